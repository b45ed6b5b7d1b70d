// Unit tests for the entities literal parser and the tweet table loader.
//
// Tests realistic tweet entity dumps (Python repr and JSON), rejection of
// anything that isn't a plain literal, and CSV loading failures.

use std::io::Write;

use tweetnet::tweets::entities::{extract_hashtags, parse_literal, EntitiesError};
use tweetnet::tweets::record::{load_tweets, read_tweets, Tweet};

const PYTHON_ENTITIES: &str = "{'hashtags': [{'text': 'RustLang', 'indices': [10, 19]}, \
{'text': 'café', 'indices': [20, 25]}], 'symbols': [], 'user_mentions': [{'screen_name': \
'ferris', 'name': 'Ferris \\'the crab\\'', 'id': 1234567890123, 'id_str': '1234567890123', \
'indices': [0, 7]}], 'urls': [], 'media': None, 'truncated': False}";

// ============================================================
// extract_hashtags: accepted inputs
// ============================================================

#[test]
fn python_repr_entities() {
    let tags = extract_hashtags(PYTHON_ENTITIES).unwrap();
    assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["RustLang", "café"]);
}

#[test]
fn json_entities() {
    let raw = r#"{"hashtags": [{"text": "data", "indices": [0, 5]}], "urls": []}"#;
    let tags = extract_hashtags(raw).unwrap();
    assert!(tags.contains("data"));
    assert_eq!(tags.len(), 1);
}

#[test]
fn empty_hashtag_list() {
    assert!(extract_hashtags("{'hashtags': []}").unwrap().is_empty());
}

#[test]
fn whitespace_around_literal() {
    assert!(extract_hashtags("  {'hashtags': []}\n").is_ok());
}

#[test]
fn large_ids_survive_parsing() {
    let value = parse_literal("{'id': 1234567890123456789, 'neg': -5, 'f': 1e3}").unwrap();
    assert_eq!(value["id"].as_u64(), Some(1234567890123456789));
    assert_eq!(value["neg"].as_i64(), Some(-5));
    assert_eq!(value["f"].as_f64(), Some(1000.0));
}

// ============================================================
// extract_hashtags: rejected inputs
// ============================================================

#[test]
fn function_calls_are_not_evaluated() {
    let err = extract_hashtags("{'hashtags': open('/etc/passwd').read()}").unwrap_err();
    assert!(matches!(err, EntitiesError::Malformed { .. }));
}

#[test]
fn expressions_are_rejected() {
    assert!(parse_literal("1 + 1").is_err());
    assert!(parse_literal("[x for x in range(3)]").is_err());
    assert!(parse_literal("{'a': lambda: 0}").is_err());
}

#[test]
fn empty_input_is_malformed() {
    assert!(matches!(
        parse_literal(""),
        Err(EntitiesError::Malformed { position: 0, .. })
    ));
}

#[test]
fn missing_hashtags_key_is_shape_error() {
    assert!(matches!(
        extract_hashtags("{'urls': []}"),
        Err(EntitiesError::Shape(_))
    ));
}

#[test]
fn hashtag_without_text_is_shape_error() {
    assert!(matches!(
        extract_hashtags("{'hashtags': [{'indices': [0, 3]}]}"),
        Err(EntitiesError::Shape(_))
    ));
}

#[test]
fn non_dict_top_level_is_shape_error() {
    assert!(matches!(
        extract_hashtags("['hashtags']"),
        Err(EntitiesError::Shape(_))
    ));
}

// ============================================================
// CSV loading
// ============================================================

#[test]
fn load_tweets_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,text,entities,followers,friends").unwrap();
    writeln!(file, "101,\"Loving #RustLang, really\",\"{PYTHON_ENTITIES}\",\"1,2\",\"3\"").unwrap();
    writeln!(file, "102,plain text,\"{{'hashtags': []}}\",,").unwrap();
    file.flush().unwrap();

    let tweets = load_tweets(file.path()).unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].id, 101);
    assert!(tweets[0].hashtags.contains("RustLang"));
    assert_eq!(tweets[1], Tweet::new(102, "plain text", Vec::<String>::new()));
}

#[test]
fn load_tweets_missing_file() {
    let err = load_tweets(std::path::Path::new("/nonexistent/topic_tweets.csv")).unwrap_err();
    assert!(err.to_string().contains("Failed to open"), "{err}");
}

#[test]
fn unparsable_id_fails() {
    let table = "id,text,entities\nabc,hello,{'hashtags': []}\n";
    let err = read_tweets(table.as_bytes()).unwrap_err();
    assert!(format!("{err:#}").contains("row 2"), "{err:#}");
}

#[test]
fn table_order_is_preserved() {
    let table = "id,text,entities\n3,c,{'hashtags': []}\n1,a,{'hashtags': []}\n2,b,{'hashtags': []}\n";
    let ids: Vec<u64> = read_tweets(table.as_bytes())
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
}
