use crate::policy::{Policy, Snippet, SnippetScope};

use super::artifact::{Artifact, ListenerKey, gateway_path, listener_path};

/// Renders SnippetsPolicy snippets into NGINX include files
///
/// Every operation is a pure projection of its input: one artifact per policy
/// that carries a snippet for the requested scope, in input order. Policies
/// are never merged; NGINX includes sibling files with a wildcard.
///
/// The caller is expected to pass only policies attached to the gateway (and
/// listener) being rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Self
    }

    /// Render snippets for the top-level `main` context
    pub fn generate_for_main(&self, policies: &[&dyn Policy]) -> Vec<Artifact> {
        generate(policies, SnippetScope::Main, |policy| {
            gateway_path(policy, SnippetScope::Main)
        })
    }

    /// Render snippets for the shared `http` context
    pub fn generate_for_http(&self, policies: &[&dyn Policy]) -> Vec<Artifact> {
        generate(policies, SnippetScope::Http, |policy| {
            gateway_path(policy, SnippetScope::Http)
        })
    }

    /// Render snippets for the `server` block of one listener
    pub fn generate_for_server(
        &self,
        policies: &[&dyn Policy],
        listener: &ListenerKey,
    ) -> Vec<Artifact> {
        generate(policies, SnippetScope::Server, |policy| {
            listener_path(policy, listener)
        })
    }
}

fn generate<F>(policies: &[&dyn Policy], scope: SnippetScope, path_for: F) -> Vec<Artifact>
where
    F: Fn(&dyn Policy) -> String,
{
    policies
        .iter()
        .filter_map(|&policy| {
            find_snippet(policy, scope).map(|snippet| Artifact {
                path: path_for(policy),
                content: snippet.value.as_bytes().to_vec(),
            })
        })
        .collect()
}

/// Find the policy's snippet for `scope`
///
/// # Panics
/// If the policy carries more than one snippet for the scope. Such a policy
/// must have been rejected by validation before reaching the generator.
fn find_snippet(policy: &dyn Policy, scope: SnippetScope) -> Option<&Snippet> {
    let context = scope.context();
    let mut matching = policy.snippets().iter().filter(|s| s.context == context);
    let snippet = matching.next();

    assert!(
        matching.next().is_none(),
        "{} {}/{} has more than one snippet for context {}",
        policy.kind(),
        policy.namespace(),
        policy.name(),
        context
    );

    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{NginxContext, SnippetsPolicy, TargetRef};

    fn fixture_policy() -> SnippetsPolicy {
        SnippetsPolicy::new(
            "default",
            "policy-1",
            TargetRef::gateway("gateway-1"),
            vec![
                Snippet::new(NginxContext::Main, "worker_processes 1;"),
                Snippet::new(NginxContext::Http, "log_format custom '...';"),
                Snippet::new(NginxContext::HttpServer, "client_max_body_size 10m;"),
            ],
        )
    }

    fn policy_at(name: &str, context: NginxContext, value: &str) -> SnippetsPolicy {
        SnippetsPolicy::new(
            "default",
            name,
            TargetRef::gateway("gateway-1"),
            vec![Snippet::new(context, value)],
        )
    }

    fn content(artifact: &Artifact) -> &str {
        std::str::from_utf8(&artifact.content).unwrap()
    }

    #[test]
    fn test_generate_for_main() {
        let policy = fixture_policy();
        let files = Generator::new().generate_for_main(&[&policy]);

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path,
            "includes/policy/default-gateway-1/SnippetsPolicy_main_policy-1.conf"
        );
        assert_eq!(content(&files[0]), "worker_processes 1;");
    }

    #[test]
    fn test_generate_for_http() {
        let policy = fixture_policy();
        let files = Generator::new().generate_for_http(&[&policy]);

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path,
            "includes/policy/default-gateway-1/SnippetsPolicy_http_policy-1.conf"
        );
        assert_eq!(content(&files[0]), "log_format custom '...';");
    }

    #[test]
    fn test_generate_for_server() {
        let policy = fixture_policy();
        let listener = ListenerKey::new("80").unwrap();
        let files = Generator::new().generate_for_server(&[&policy], &listener);

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path,
            "includes/policy/default-gateway-1/80/SnippetsPolicy_server_policy-1.conf"
        );
        assert_eq!(content(&files[0]), "client_max_body_size 10m;");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let generator = Generator::new();
        assert!(generator.generate_for_main(&[]).is_empty());
        assert!(generator.generate_for_http(&[]).is_empty());
        assert!(
            generator
                .generate_for_server(&[], &ListenerKey::new("80").unwrap())
                .is_empty()
        );
    }

    #[test]
    fn test_single_scope_policy_only_renders_its_scope() {
        let generator = Generator::new();
        let listener = ListenerKey::new("80").unwrap();
        let policy = policy_at("http-only", NginxContext::Http, "gzip on;");
        let policies: [&dyn Policy; 1] = [&policy];

        assert!(generator.generate_for_main(&policies).is_empty());
        assert!(generator.generate_for_server(&policies, &listener).is_empty());

        let files = generator.generate_for_http(&policies);
        assert_eq!(files.len(), 1);
        assert_eq!(content(&files[0]), "gzip on;");
    }

    #[test]
    fn test_content_is_verbatim() {
        let text = "  map $http_upgrade $connection_upgrade {\n    default upgrade;\n  }\n\n";
        let policy = policy_at("raw", NginxContext::Http, text);
        let files = Generator::new().generate_for_http(&[&policy]);
        assert_eq!(files[0].content, text.as_bytes());
    }

    #[test]
    fn test_output_follows_input_order() {
        let first = policy_at("zeta", NginxContext::Main, "# zeta");
        let skipped = policy_at("mid", NginxContext::Http, "# mid");
        let last = policy_at("alpha", NginxContext::Main, "# alpha");

        let files = Generator::new().generate_for_main(&[&first, &skipped, &last]);
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "includes/policy/default-gateway-1/SnippetsPolicy_main_zeta.conf",
                "includes/policy/default-gateway-1/SnippetsPolicy_main_alpha.conf",
            ]
        );
    }

    #[test]
    fn test_listeners_render_to_distinct_paths() {
        let policy = fixture_policy();
        let generator = Generator::new();
        let a = generator.generate_for_server(&[&policy], &ListenerKey::new("80").unwrap());
        let b = generator.generate_for_server(&[&policy], &ListenerKey::new("443").unwrap());

        assert_eq!(a[0].content, b[0].content);
        assert_ne!(a[0].path, b[0].path);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let policy = fixture_policy();
        let other = policy_at("policy-2", NginxContext::Main, "pcre_jit on;");
        let policies: [&dyn Policy; 2] = [&policy, &other];
        let generator = Generator::new();

        assert_eq!(
            generator.generate_for_main(&policies),
            generator.generate_for_main(&policies)
        );
    }

    struct OtherPolicy {
        target: TargetRef,
    }

    impl Policy for OtherPolicy {
        fn kind(&self) -> &str {
            "ClientSettingsPolicy"
        }

        fn namespace(&self) -> &str {
            "default"
        }

        fn name(&self) -> &str {
            "csp"
        }

        fn target_ref(&self) -> &TargetRef {
            &self.target
        }
    }

    #[test]
    fn test_policy_kinds_without_snippets_are_skipped() {
        let other = OtherPolicy {
            target: TargetRef::gateway("gateway-1"),
        };
        let policy = fixture_policy();
        let files = Generator::new().generate_for_http(&[&other, &policy]);
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("SnippetsPolicy_http_policy-1.conf"));
    }

    #[test]
    #[should_panic(expected = "more than one snippet for context http")]
    fn test_duplicate_context_is_a_contract_violation() {
        let policy = SnippetsPolicy::new(
            "default",
            "broken",
            TargetRef::gateway("gateway-1"),
            vec![
                Snippet::new(NginxContext::Http, "a;"),
                Snippet::new(NginxContext::Http, "b;"),
            ],
        );
        Generator::new().generate_for_http(&[&policy]);
    }
}
