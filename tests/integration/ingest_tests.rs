//! End-to-end ingestion tests against the in-memory store

use std::io::Write;
use std::sync::Arc;

use openlibrary_loader::{
    models::{Author, UNKNOWN_AUTHOR},
    repository::{AuthorStore, MemoryRepository, WorkStore},
    services::IngestService,
};
use tempfile::NamedTempFile;

const JANE: &str = r#"x	{"key":"/authors/OL1A","name":"Jane Doe","personal_name":"Jane D."}"#;
const BOOK: &str =
    r#"y	{"key":"/works/OL1W","title":"Book","authors":[{"author":{"key":"/authors/OL1A"}}]}"#;

fn dump(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create dump file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write dump line");
    }
    file
}

fn setup() -> (Arc<MemoryRepository>, IngestService) {
    let repo = Arc::new(MemoryRepository::new());
    let service = IngestService::new(repo.clone(), repo.clone());
    (repo, service)
}

#[tokio::test]
async fn test_author_line_round_trip() {
    let (repo, service) = setup();
    let report = service.ingest_authors(dump(&[JANE]).path()).await.unwrap();

    assert_eq!((report.lines, report.persisted, report.skipped), (1, 1, 0));
    let author = AuthorStore::find_by_id(repo.as_ref(), "OL1A").await.unwrap();
    assert_eq!(
        author,
        Some(Author {
            id: "OL1A".to_string(),
            name: "Jane Doe".to_string(),
            personal_name: "Jane D.".to_string(),
        })
    );
}

#[tokio::test]
async fn test_work_resolves_author_loaded_earlier() {
    let (repo, service) = setup();
    service.ingest_authors(dump(&[JANE]).path()).await.unwrap();
    let report = service.ingest_works(dump(&[BOOK]).path()).await.unwrap();

    assert_eq!(report.unresolved_authors, 0);
    let work = WorkStore::find_by_id(repo.as_ref(), "OL1W").await.unwrap().unwrap();
    assert_eq!(work.name, "Book");
    assert_eq!(work.author_ids, vec!["OL1A"]);
    assert_eq!(work.author_names, vec!["Jane Doe"]);
}

#[tokio::test]
async fn test_work_before_authors_gets_unknown_author() {
    let (repo, service) = setup();
    let report = service.ingest_works(dump(&[BOOK]).path()).await.unwrap();

    assert_eq!(report.persisted, 1);
    assert_eq!(report.unresolved_authors, 1);
    let work = WorkStore::find_by_id(repo.as_ref(), "OL1W").await.unwrap().unwrap();
    assert_eq!(work.author_names, vec![UNKNOWN_AUTHOR]);
}

#[tokio::test]
async fn test_author_names_stay_aligned() {
    let (repo, service) = setup();
    service
        .ingest_authors(
            dump(&[
                JANE,
                r#"x	{"key":"/authors/OL3A","name":"Ann Other"}"#,
            ])
            .path(),
        )
        .await
        .unwrap();
    service
        .ingest_works(
            dump(&[
                r#"y	{"key":"/works/OL2W","authors":[{"author":{"key":"/authors/OL3A"}},{"author":{"key":"/authors/OL2A"}},{"author":{"key":"/authors/OL1A"}}]}"#,
                r#"y	{"key":"/works/OL3W","title":"No authors"}"#,
            ])
            .path(),
        )
        .await
        .unwrap();

    for work in repo.works().await {
        assert_eq!(work.author_names.len(), work.author_ids.len());
    }
    let work = WorkStore::find_by_id(repo.as_ref(), "OL2W").await.unwrap().unwrap();
    assert_eq!(work.author_ids, vec!["OL3A", "OL2A", "OL1A"]);
    assert_eq!(work.author_names, vec!["Ann Other", UNKNOWN_AUTHOR, "Jane Doe"]);
}

#[tokio::test]
async fn test_passes_are_idempotent() {
    let authors = dump(&[JANE, r#"x	{"key":"/authors/OL2A","name":"Second"}"#]);
    let works = dump(&[
        BOOK,
        r#"y	{"key":"/works/OL5W","title":"Later","covers":[1,2],"created":{"value":"2008-04-01T03:28:50.123456"}}"#,
    ]);

    let (repo, service) = setup();
    service.ingest_authors(authors.path()).await.unwrap();
    service.ingest_works(works.path()).await.unwrap();
    let (authors_once, works_once) = (repo.authors().await, repo.works().await);

    service.ingest_authors(authors.path()).await.unwrap();
    service.ingest_works(works.path()).await.unwrap();

    assert_eq!(repo.authors().await, authors_once);
    assert_eq!(repo.works().await, works_once);
    assert_eq!(repo.author_count().await, 2);
    assert_eq!(repo.work_count().await, 2);
}

#[tokio::test]
async fn test_absent_and_empty_description() {
    let (repo, service) = setup();
    service
        .ingest_works(
            dump(&[
                r#"y	{"key":"/works/OL1W","title":"Absent"}"#,
                r#"y	{"key":"/works/OL2W","title":"Empty","description":{"value":""}}"#,
            ])
            .path(),
        )
        .await
        .unwrap();

    let absent = WorkStore::find_by_id(repo.as_ref(), "OL1W").await.unwrap().unwrap();
    let empty = WorkStore::find_by_id(repo.as_ref(), "OL2W").await.unwrap().unwrap();
    assert_eq!(absent.description, None);
    assert_eq!(empty.description, Some(String::new()));
}

#[tokio::test]
async fn test_line_without_json_is_skipped() {
    let (repo, service) = setup();
    let report = service
        .ingest_authors(dump(&[JANE, "/type/author\tno payload", ""]).path())
        .await
        .unwrap();

    assert_eq!(report.lines, 3);
    assert_eq!(report.persisted, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.skipped_by_reason.get("no_json_object"), Some(&2));
    assert_eq!(repo.author_count().await, 1);
}

#[tokio::test]
async fn test_bad_lines_do_not_stop_the_pass() {
    let (repo, service) = setup();
    let report = service
        .ingest_works(
            dump(&[
                r#"y	{"key":"/works/OL1W","title":"Broken"#,
                r#"y	{"key":"/works/OL2W","authors":[{"role":"editor"}]}"#,
                r#"y	{"title":"No key"}"#,
                r#"y	{"key":"/works/OL4W","title":"Fine"}"#,
            ])
            .path(),
        )
        .await
        .unwrap();

    assert_eq!((report.persisted, report.skipped), (1, 3));
    assert_eq!(report.skipped_by_reason.get("malformed_json"), Some(&1));
    assert_eq!(report.skipped_by_reason.get("malformed_author_ref"), Some(&1));
    assert_eq!(report.skipped_by_reason.get("empty_id"), Some(&1));
    assert_eq!(repo.work_count().await, 1);
    assert!(WorkStore::find_by_id(repo.as_ref(), "OL4W").await.unwrap().is_some());
}

#[tokio::test]
async fn test_nul_character_skips_only_its_line() {
    let (repo, service) = setup();
    let report = service
        .ingest_authors(
            dump(&[
                r#"x	{"key":"/authors/OL9A","name":"Ja\u0000ne"}"#,
                JANE,
            ])
            .path(),
        )
        .await
        .unwrap();

    assert_eq!((report.persisted, report.skipped), (1, 1));
    assert_eq!(report.skipped_by_reason.get("invalid_text"), Some(&1));
    assert!(AuthorStore::find_by_id(repo.as_ref(), "OL9A").await.unwrap().is_none());
    assert!(AuthorStore::find_by_id(repo.as_ref(), "OL1A").await.unwrap().is_some());
}

#[tokio::test]
async fn test_author_reference_without_prefix_is_kept() {
    let (repo, service) = setup();
    service.ingest_authors(dump(&[JANE]).path()).await.unwrap();
    let report = service
        .ingest_works(
            dump(&[r#"y	{"key":"/works/OL1W","authors":[{"author":{"key":"/authors/OL2A"}},{"author":{"key":"OL1A"}}]}"#])
                .path(),
        )
        .await
        .unwrap();

    assert_eq!(report.persisted, 1);
    let work = WorkStore::find_by_id(repo.as_ref(), "OL1W").await.unwrap().unwrap();
    assert_eq!(work.author_ids, vec!["OL2A", "OL1A"]);
    assert_eq!(work.author_names, vec![UNKNOWN_AUTHOR, "Jane Doe"]);
}

#[tokio::test]
async fn test_malformed_date_skips_work() {
    let (repo, service) = setup();
    let report = service
        .ingest_works(
            dump(&[r#"y	{"key":"/works/OL1W","title":"Book","created":{"value":"not-a-date"}}"#])
                .path(),
        )
        .await
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.skipped_by_reason.get("invalid_date"), Some(&1));
    assert!(WorkStore::find_by_id(repo.as_ref(), "OL1W").await.unwrap().is_none());
}

#[tokio::test]
async fn test_full_work_record() {
    let (repo, service) = setup();
    service.ingest_authors(dump(&[JANE]).path()).await.unwrap();
    service
        .ingest_works(
            dump(&[concat!(
                "/type/work\t/works/OL1W\t3\t2010-04-28T06:54:19.472104\t",
                r#"{"key":"/works/OL1W","title":"Book","description":{"type":"/type/text","value":"A story"},"#,
                r#""created":{"type":"/type/datetime","value":"2009-12-11T01:57:19.964652"},"#,
                r#""covers":[123,456],"authors":[{"author":{"key":"/authors/OL1A"}}]}"#
            )])
            .path(),
        )
        .await
        .unwrap();

    let work = WorkStore::find_by_id(repo.as_ref(), "OL1W").await.unwrap().unwrap();
    assert_eq!(work.description.as_deref(), Some("A story"));
    assert_eq!(
        work.published_date,
        chrono::NaiveDate::from_ymd_opt(2009, 12, 11)
    );
    assert_eq!(work.cover_ids, vec!["123", "456"]);
    assert_eq!(work.author_names, vec!["Jane Doe"]);
}
