//! The document loaded when no path is given: a small index that touches
//! every visualized feature (shards, analyzers, multi-fields, aliases and
//! nested containers).

pub const SAMPLE_DOCUMENT: &str = r#"{
  "settings": {
    "number_of_shards": 5,
    "number_of_replicas": 2,
    "analysis": {
      "analyzer": {
        "email": {
          "type": "custom",
          "tokenizer": "uax_url_email",
          "filter": ["lowercase", "stop"]
        }
      }
    }
  },
  "mappings": {
    "properties": {
      "title": {
        "type": "text"
      },
      "id": {
        "type": "keyword"
      },
      "email": {
        "type": "text",
        "analyzer": "email"
      },
      "content": {
        "type": "text",
        "fields": {
          "keyword": {
            "type": "keyword",
            "ignore_above": 256
          }
        }
      },
      "code": {
        "type": "alias",
        "path": "id"
      },
      "user": {
        "type": "nested",
        "properties": {
          "id": {
            "type": "keyword"
          },
          "name": {
            "type": "text"
          }
        }
      }
    }
  }
}"#;
