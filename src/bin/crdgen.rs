//! Print the provider's CRDs as a multi-document YAML stream.
//!
//! ```text
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use kube::CustomResourceExt;
use provider_backblaze::crd::{ProviderConfig, ProviderConfigUsage};

fn main() -> anyhow::Result<()> {
    let crds = [ProviderConfig::crd(), ProviderConfigUsage::crd()];
    for crd in &crds {
        print!("---\n{}", serde_yaml::to_string(crd)?);
    }
    Ok(())
}
