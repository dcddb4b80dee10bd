//! Azure Cognitive Search index definition.
//!
//! This module defines the fields of the legal document index.

use serde_json::{json, Value};

/// Get the index definition for the legal document index.
///
/// The definition includes:
/// - **id**: the document key
/// - **Searchable text**: filename, content (English Lucene analyzer), summary, keywords
/// - **Filterable metadata**: file type, upload date, size
/// - **CORS**: any origin, cached for five minutes
pub fn index_definition(index_name: &str) -> Value {
    json!({
        "name": index_name,
        "fields": [
            {
                "name": "id",
                "type": "Edm.String",
                "key": true,
                "searchable": false,
                "sortable": true
            },
            {
                "name": "filename",
                "type": "Edm.String",
                "searchable": true,
                "sortable": true,
                "filterable": true
            },
            {
                "name": "content",
                "type": "Edm.String",
                "searchable": true,
                "analyzer": "en.lucene"
            },
            {
                "name": "file_type",
                "type": "Edm.String",
                "searchable": false,
                "filterable": true,
                "facetable": true
            },
            {
                "name": "upload_date",
                "type": "Edm.DateTimeOffset",
                "sortable": true,
                "filterable": true
            },
            {
                "name": "file_size",
                "type": "Edm.Int64",
                "sortable": true,
                "filterable": true
            },
            {
                "name": "blob_url",
                "type": "Edm.String",
                "searchable": false,
                "retrievable": true
            },
            {
                "name": "summary",
                "type": "Edm.String",
                "searchable": true
            },
            {
                "name": "keywords",
                "type": "Collection(Edm.String)",
                "searchable": true,
                "filterable": true,
                "facetable": true
            }
        ],
        "corsOptions": {
            "allowedOrigins": ["*"],
            "maxAgeInSeconds": 300
        }
    })
}
