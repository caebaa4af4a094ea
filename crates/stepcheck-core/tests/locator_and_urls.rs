use stepcheck_core::{
    locate_step_file, pr_touches_step, release_endpoint, tags_endpoint, CheckConfig, FakeHost,
    HostConfig, LocateError, RegistryConfig,
};
use stepcheck_model::ChangedFile;

fn file(path: &str) -> ChangedFile {
    ChangedFile {
        filename: path.to_string(),
        raw_url: format!("https://host/raw/{path}"),
    }
}

#[test]
fn locator_selects_only_the_step_definition() {
    let files = vec![
        file("docs/readme.md"),
        file("steps/foo/1.0.0/step.yml"),
        file("steps/foo/1.0.0/step.sh"),
    ];
    let located = locate_step_file(&files, &RegistryConfig::default()).expect("locate");
    assert_eq!(located.filename, "steps/foo/1.0.0/step.yml");
}

#[test]
fn locator_requires_the_steps_root_prefix() {
    let files = vec![file("other/foo/1.0.0/step.yml")];
    assert_eq!(
        locate_step_file(&files, &RegistryConfig::default()),
        Err(LocateError::NotFound)
    );
}

#[test]
fn locator_does_not_match_suffix_lookalikes() {
    // "another-step.yml" ends with "step.yml" but is not a step definition.
    let files = vec![file("steps/foo/1.0.0/another-step.yml")];
    assert_eq!(
        locate_step_file(&files, &RegistryConfig::default()),
        Err(LocateError::NotFound)
    );
}

#[test]
fn locator_reports_every_ambiguous_candidate() {
    let files = vec![
        file("steps/a/1.0.0/step.yml"),
        file("steps/b/2.0.0/step.yml"),
    ];
    match locate_step_file(&files, &RegistryConfig::default()) {
        Err(LocateError::MultipleCandidates(paths)) => {
            assert_eq!(paths.len(), 2);
            assert!(paths.contains(&"steps/a/1.0.0/step.yml".to_string()));
        }
        other => panic!("expected MultipleCandidates, got {other:?}"),
    }
}

#[test]
fn git_suffix_and_web_host_are_rewritten_to_the_api_tags_endpoint() {
    let host = HostConfig::default();
    assert_eq!(
        tags_endpoint("https://github.com/org/repo.git", &host),
        "https://api.github.com/repos/org/repo/tags"
    );
    assert_eq!(
        tags_endpoint("https://github.com/org/repo", &host),
        "https://api.github.com/repos/org/repo/tags"
    );
}

#[test]
fn foreign_urls_pass_through_unrewritten() {
    let host = HostConfig::default();
    assert_eq!(
        tags_endpoint("https://example.com/org/repo.git", &host),
        "https://example.com/org/repo/tags"
    );
}

#[test]
fn release_endpoint_targets_the_tag() {
    let host = HostConfig::default();
    assert_eq!(
        release_endpoint("https://github.com/org/repo.git", "1.2.3", &host),
        "https://api.github.com/repos/org/repo/releases/tags/1.2.3"
    );
}

#[tokio::test]
async fn touch_signal_needs_no_content_or_tag_fetch() {
    let host = FakeHost::default();
    host.files.lock().await.insert(
        "9".to_string(),
        vec![file("steps/foo/1.0.0/step.yml"), file("docs/readme.md")],
    );

    let cfg = CheckConfig::default();
    assert!(pr_touches_step(&host, &cfg, "9").await.expect("signal"));
    assert_eq!(
        host.content_calls.load(std::sync::atomic::Ordering::Relaxed),
        0
    );
    assert_eq!(host.tag_calls.load(std::sync::atomic::Ordering::Relaxed), 0);
}

#[tokio::test]
async fn touch_signal_is_false_without_a_step_file() {
    let host = FakeHost::default();
    host.files
        .lock()
        .await
        .insert("9".to_string(), vec![file("docs/readme.md")]);

    let cfg = CheckConfig::default();
    assert!(!pr_touches_step(&host, &cfg, "9").await.expect("signal"));
}
