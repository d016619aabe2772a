use farmer_text_profile::{
    ChunkingConfig, ProfileTextFileManager, ValidationThresholds, ValidationWarning,
    PROFILE_FILE_NAME,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn manager() -> (TempDir, ProfileTextFileManager) {
    let temp = TempDir::new().expect("tempdir");
    let manager = ProfileTextFileManager::new(temp.path().join("data"));
    (temp, manager)
}

#[tokio::test]
async fn absent_document_reads_empty() {
    let (_temp, manager) = manager();

    assert!(!manager.profile_exists().await);
    assert!(!manager.has_content().await);
    assert_eq!(manager.read_profile().await, "");
    assert_eq!(manager.get_file_size().await, 0);
    assert!(manager.get_chunks_for_embedding().await.is_empty());
}

#[tokio::test]
async fn create_is_idempotent_and_keeps_content() {
    let (_temp, manager) = manager();

    assert!(manager.create_or_load_profile_file().await);
    assert!(manager.profile_exists().await);
    assert_eq!(manager.read_profile().await, "");

    assert!(manager.write_profile("maize, 3 acres").await);
    assert!(manager.create_or_load_profile_file().await);
    assert_eq!(manager.read_profile().await, "maize, 3 acres");
}

#[tokio::test]
async fn write_read_round_trip_preserves_multibyte_text() {
    let (_temp, manager) = manager();
    let text = "किसान 🌾 café · ರೈತ\nline two";

    assert!(manager.write_profile(text).await);
    assert_eq!(manager.read_profile().await, text);
    assert_eq!(manager.get_file_size().await, text.len() as u64);
}

#[tokio::test]
async fn append_concatenates_without_separator() {
    let (_temp, manager) = manager();

    assert!(manager.append_profile("Grows").await);
    assert!(manager.append_profile(" ragi").await);
    assert!(manager.append_profile("🌱").await);
    assert_eq!(manager.read_profile().await, "Grows ragi🌱");
}

#[tokio::test]
async fn clear_keeps_an_empty_document() {
    let (_temp, manager) = manager();
    manager.write_profile("something").await;

    assert!(manager.clear_profile().await);
    assert!(manager.profile_exists().await);
    assert!(!manager.has_content().await);
    assert_eq!(manager.get_file_size().await, 0);
}

#[tokio::test]
async fn whitespace_only_has_no_content() {
    let (_temp, manager) = manager();
    manager.write_profile("  \n\t ").await;
    assert!(manager.profile_exists().await);
    assert!(!manager.has_content().await);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (_temp, manager) = manager();

    assert!(manager.delete_profile().await);

    manager.write_profile("to be removed").await;
    assert!(manager.delete_profile().await);
    assert!(!manager.profile_exists().await);
    assert!(manager.delete_profile().await);
}

#[tokio::test]
async fn file_path_is_absolute_and_stable() {
    let (temp, manager) = manager();
    let path = manager.get_file_path();

    assert!(path.is_absolute());
    assert!(path.ends_with(PROFILE_FILE_NAME));
    assert!(path.starts_with(temp.path()));
}

#[tokio::test]
async fn stats_for_absent_and_present_documents() {
    let (_temp, manager) = manager();

    let stats = manager.get_profile_stats().await;
    assert!(!stats.exists);
    assert_eq!(stats.size_bytes, 0);
    assert_eq!(stats.line_count, 0);
    assert_eq!(stats.word_count, 0);
    assert_eq!(stats.chunk_count, 0);

    let text = "Paddy in kharif,\nmustard in rabi.\n🌾";
    manager.write_profile(text).await;
    let stats = manager.get_profile_stats().await;
    assert!(stats.exists);
    assert_eq!(stats.size_bytes, text.len() as u64);
    assert_eq!(stats.char_count, text.chars().count());
    assert_eq!(stats.word_count, 7);
    assert_eq!(stats.line_count, 3);
    assert_eq!(stats.chunk_count, 1);
    assert_eq!(stats.file_path, manager.get_file_path().display().to_string());
}

#[tokio::test]
async fn chunk_boundaries() {
    let (_temp, manager) = manager();

    manager.write_profile(&"a".repeat(500)).await;
    assert_eq!(manager.get_chunks_for_embedding().await.len(), 1);

    manager.write_profile(&"b".repeat(1200)).await;
    let chunks = manager.get_chunks_for_embedding().await;
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= 500));
    assert_eq!(manager.get_profile_stats().await.chunk_count, chunks.len());
}

#[tokio::test]
async fn validation_thresholds() {
    let (_temp, manager) = manager();

    let result = manager.validate_profile().await;
    assert!(result.is_valid);
    assert_eq!(result.warnings, vec![ValidationWarning::Empty]);

    manager.write_profile("Short").await;
    let result = manager.validate_profile().await;
    assert!(result.is_valid);
    assert_eq!(result.warnings, vec![ValidationWarning::Short]);

    manager.write_profile(&"z".repeat(6000)).await;
    let result = manager.validate_profile().await;
    assert!(result.is_valid);
    assert_eq!(result.warnings, vec![ValidationWarning::Long]);

    manager
        .write_profile("We grow turmeric and chilli on four acres of red soil near Guntur.")
        .await;
    let result = manager.validate_profile().await;
    assert!(result.is_valid);
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn custom_config_is_applied() {
    let temp = TempDir::new().expect("tempdir");
    let manager = ProfileTextFileManager::with_config(
        temp.path(),
        ChunkingConfig {
            chunk_size: 100,
            overlap: 10,
        },
        ValidationThresholds {
            min_informative_chars: 5,
            max_comfortable_chars: 200,
        },
    )
    .expect("config");

    manager.write_profile(&"c".repeat(250)).await;
    assert_eq!(manager.get_chunks_for_embedding().await.len(), 3);
    assert_eq!(
        manager.validate_profile().await.warnings,
        vec![ValidationWarning::Long]
    );
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let result = ProfileTextFileManager::with_config(
        temp.path(),
        ChunkingConfig::default(),
        ValidationThresholds {
            min_informative_chars: 100,
            max_comfortable_chars: 10,
        },
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn write_fails_when_directory_is_a_file() {
    let temp = TempDir::new().expect("tempdir");
    let blocker = temp.path().join("blocked");
    std::fs::write(&blocker, "not a directory").expect("write");

    let manager = ProfileTextFileManager::new(&blocker);
    assert!(!manager.write_profile("text").await);
    assert!(!manager.create_or_load_profile_file().await);
    assert_eq!(manager.read_profile().await, "");
}
