//! End-to-end tests for the processing pipeline

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use textstat_core::{Config, Error, ReadStrategy, TextStatistics, WordFrequency};

const CAT_LINE: &str =
    "'Oh, you can't help that,' said the Cat: 'we're all mad here. I'm mad. You're mad.'";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, content: impl AsRef<[u8]>) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }

    fn pipeline(&self) -> TextStatistics {
        let config = Config::builder()
            .cache_dir(self.cache_dir())
            .chunk_size(64)
            .build()
            .unwrap();
        TextStatistics::with_config(config)
    }
}

fn cat_text() -> String {
    vec![CAT_LINE; 200].join("\n")
}

#[test]
fn test_cheshire_cat_statistics() {
    let fixture = Fixture::new();
    let source = fixture.write("cat.txt", cat_text());

    for strategy in ReadStrategy::ALL {
        let mut stats = fixture.pipeline();
        let result = stats.process_file(&source, false, strategy).unwrap();

        assert_eq!(result.line_count, 200, "{strategy}");
        assert_eq!(result.distinct_words(), 14, "{strategy}");
        assert_eq!(result.word_count, 200 * 16, "{strategy}");
        assert_eq!(result.frequency_of("mad"), Some(600), "{strategy}");

        assert_eq!(stats.top_words(1).unwrap(), vec![WordFrequency::new("mad", 600)]);

        let longest = stats.longest_words(3).unwrap();
        for word in ["can't", "we're", "You're"] {
            assert!(longest.iter().any(|w| w == word), "{strategy}: {longest:?}");
        }
    }
}

#[test]
fn test_three_line_sample() {
    let fixture = Fixture::new();
    let source = fixture.write("sample.txt", format!("{CAT_LINE}\n{CAT_LINE}\n{CAT_LINE}\n"));

    let mut stats = fixture.pipeline();
    let result = stats
        .process_file(&source, false, ReadStrategy::ChunkedBuffer)
        .unwrap();
    assert_eq!(result.line_count, 3);
    assert_eq!(result.distinct_words(), 14);
    assert_eq!(result.frequency_of("mad"), Some(9));
}

#[test]
fn test_second_run_reuses_cache() {
    let fixture = Fixture::new();
    let source = fixture.write("cat.txt", cat_text());

    let mut stats = fixture.pipeline();
    let first = stats
        .process_file(&source, true, ReadStrategy::ChunkedBuffer)
        .unwrap()
        .clone();
    let index_after_first = fs::read_to_string(stats.cache().index_path()).unwrap();

    let second = stats
        .process_file(&source, true, ReadStrategy::UnbufferedLine)
        .unwrap()
        .clone();

    assert_eq!(first, second);
    assert_eq!(stats.cache().entries().unwrap().len(), 1);
    assert_eq!(
        fs::read_to_string(stats.cache().index_path()).unwrap(),
        index_after_first
    );
}

#[test]
fn test_cache_is_keyed_by_content_not_name() {
    let fixture = Fixture::new();
    let original = fixture.write("original.txt", cat_text());
    let copy = fixture.write("copy.txt", cat_text());

    let mut stats = fixture.pipeline();
    let first = stats
        .process_file(&original, true, ReadStrategy::LineBuffered)
        .unwrap()
        .clone();

    let mut fresh = fixture.pipeline();
    let second = fresh
        .process_file(&copy, true, ReadStrategy::LineBuffered)
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.checksum, first.checksum);
    assert_eq!(second.frequencies, first.frequencies);
}

#[test]
fn test_reuse_disabled_rescans() {
    let fixture = Fixture::new();
    let source = fixture.write("cat.txt", cat_text());

    let mut stats = fixture.pipeline();
    let first_id = stats
        .process_file(&source, true, ReadStrategy::ChunkedBuffer)
        .unwrap()
        .id;
    let second = stats
        .process_file(&source, false, ReadStrategy::ChunkedBuffer)
        .unwrap();

    assert_ne!(second.id, first_id);
    assert_eq!(second.frequency_of("mad"), Some(600));
    assert_eq!(stats.cache().entries().unwrap().len(), 2);
}

#[test]
fn test_damaged_payload_triggers_rescan() {
    let fixture = Fixture::new();
    let source = fixture.write("cat.txt", cat_text());

    let mut stats = fixture.pipeline();
    let first_id = stats
        .process_file(&source, true, ReadStrategy::ChunkedBuffer)
        .unwrap()
        .id;
    fs::remove_file(stats.cache().payload_path(first_id)).unwrap();

    let second_id = {
        let second = stats
            .process_file(&source, true, ReadStrategy::ChunkedBuffer)
            .unwrap();
        assert_ne!(second.id, first_id);
        assert_eq!(second.frequency_of("mad"), Some(600));
        second.id
    };

    // the rescanned record serves every later run
    for _ in 0..3 {
        let again = stats
            .process_file(&source, true, ReadStrategy::LineBuffered)
            .unwrap();
        assert_eq!(again.id, second_id);
        assert_eq!(again.frequency_of("mad"), Some(600));
    }
    assert_eq!(stats.cache().entries().unwrap().len(), 2);
}

#[test]
fn test_numbers_are_not_words() {
    let fixture = Fixture::new();
    let source = fixture.write("numbers.txt", "42 3.14 (1,000) -7 pages 42nd\n");

    let mut stats = fixture.pipeline();
    let result = stats
        .process_file(&source, false, ReadStrategy::LineBuffered)
        .unwrap();
    let words: Vec<&str> = result.frequencies().iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words, vec!["pages", "42nd"]);
    assert_eq!(result.word_count, 2);
}

#[test]
fn test_case_variants_merge_into_first_spelling() {
    let fixture = Fixture::new();
    let source = fixture.write("mad.txt", "Mad mad MAD");

    let mut stats = fixture.pipeline();
    let result = stats
        .process_file(&source, false, ReadStrategy::UnbufferedLine)
        .unwrap();
    assert_eq!(result.frequencies(), &[WordFrequency::new("Mad", 3)]);
}

#[test]
fn test_file_without_words() {
    let fixture = Fixture::new();
    let source = fixture.write("digits.txt", "1 2 3\n... !!!\n");

    let mut stats = fixture.pipeline();
    let result = stats
        .process_file(&source, true, ReadStrategy::ChunkedBuffer)
        .unwrap();
    assert_eq!(result.line_count, 2);
    assert_eq!(result.word_count, 0);

    assert!(matches!(stats.top_words(5), Err(Error::NoWordsInFile)));
    assert!(matches!(stats.longest_words(5), Err(Error::NoWordsInFile)));

    // zero-word records are served from the index alone
    let again = stats
        .process_file(&source, true, ReadStrategy::ChunkedBuffer)
        .unwrap();
    assert_eq!(again.word_count, 0);
    assert_eq!(stats.cache().entries().unwrap().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_file_url_source() {
    let fixture = Fixture::new();
    let source = fixture.write("alice.txt", "Curiouser and curiouser!");

    let mut stats = fixture.pipeline();
    let result = stats
        .process_file(&format!("file://{source}"), false, ReadStrategy::ChunkedBuffer)
        .unwrap();
    assert_eq!(result.source_name, "alice.txt");
    assert_eq!(result.frequency_of("curiouser"), Some(2));
}

#[cfg(unix)]
#[test]
fn test_file_url_with_escapes_and_localhost() {
    let fixture = Fixture::new();
    let source = fixture.write("my file.txt", "Off with their heads!");
    let escaped = source.replace(' ', "%20");

    let mut stats = fixture.pipeline();
    for reference in [format!("file://{escaped}"), format!("file://localhost{escaped}")] {
        let result = stats
            .process_file(&reference, true, ReadStrategy::ChunkedBuffer)
            .unwrap();
        assert_eq!(result.source_name, "my file.txt");
        assert_eq!(result.frequency_of("heads"), Some(1));
    }
}

#[test]
fn test_queries_before_processing() {
    let stats = TextStatistics::new();
    assert!(matches!(stats.top_words(1), Err(Error::NoFileProcessed)));
    assert!(matches!(stats.longest_words(1), Err(Error::NoFileProcessed)));
}
