pub mod artifact;
pub mod snippets;

pub use artifact::{
    Artifact, InvalidListenerKey, ListenerKey, POLICY_INCLUDE_ROOT, file_name, gateway_path,
    listener_path, target_dir,
};
pub use snippets::Generator;
