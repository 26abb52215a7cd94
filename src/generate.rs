//! Pure record generators
//!
//! Each function builds unsaved record payloads from counts/specs plus the
//! already-assigned ids of their dependencies. Nothing here talks to the
//! store, and all randomness comes through the caller's RNG so runs are
//! reproducible from a seed.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::BTreeMap;

use crate::model::{
    AccountRecord, ConceptRecord, ContentRecord, DocumentInline, Id, LiteralContent, Persisted,
};

/// Where content names come from: an explicit list (schema-defining content)
/// or an index-derived `{prefix}_{i}` series (instance content).
pub enum NameSource<'a> {
    Explicit(&'a [String]),
    Prefixed(&'a str),
}

impl NameSource<'_> {
    fn name(&self, index: usize) -> String {
        match self {
            NameSource::Explicit(names) => names[index].clone(),
            NameSource::Prefixed(prefix) => format!("{prefix}_{index}"),
        }
    }
}

/// Draw an author uniformly at random from the run's account ids.
///
/// Independent draws per record; no balancing across accounts.
pub fn random_author<R: Rng>(account_ids: &[Id], rng: &mut R) -> Id {
    account_ids[rng.gen_range(0..account_ids.len())]
}

/// `count` accounts named `account_0 .. account_{count-1}`
pub fn make_accounts(count: usize) -> Vec<AccountRecord> {
    (0..count)
        .map(|i| AccountRecord {
            account_local_id: format!("account_{i}"),
            name: format!("account_{i}"),
        })
        .collect()
}

/// Content stubs with randomly drawn authors and an inline document payload
pub fn make_content<R: Rng>(
    count: usize,
    space_id: Id,
    account_ids: &[Id],
    names: &NameSource<'_>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ContentRecord> {
    (0..count)
        .map(|i| {
            let name = names.name(i);
            let author_id = random_author(account_ids, rng);
            ContentRecord {
                text: name.clone(),
                source_local_id: name.clone(),
                created: now,
                last_modified: now,
                space_id,
                author_id,
                document_inline: DocumentInline {
                    source_local_id: name,
                    created: now,
                    last_modified: now,
                    author_id,
                },
            }
        })
        .collect()
}

/// A schema concept defining a node type (`roles` empty) or a relation type
/// (`roles` holds the declared role names).
pub fn make_schema_concept(
    name: &str,
    content: &Persisted<ContentRecord>,
    roles: Vec<String>,
    space_id: Id,
    now: DateTime<Utc>,
) -> ConceptRecord {
    ConceptRecord {
        name: name.to_string(),
        created: now,
        last_modified: now,
        space_id,
        author_id: content.record.author_id,
        represented_by_id: Some(content.id),
        schema_id: None,
        is_schema: true,
        literal_content: Some(LiteralContent { roles }),
        reference_content: None,
    }
}

/// An instance node concept conforming to `schema_id`
pub fn make_node_instance(
    name: &str,
    content: &Persisted<ContentRecord>,
    schema_id: Id,
    space_id: Id,
    now: DateTime<Utc>,
) -> ConceptRecord {
    ConceptRecord {
        name: name.to_string(),
        created: now,
        last_modified: now,
        space_id,
        author_id: content.record.author_id,
        represented_by_id: Some(content.id),
        schema_id: Some(schema_id),
        is_schema: false,
        literal_content: None,
        reference_content: None,
    }
}

/// An instance relation concept with resolved role bindings
pub fn make_relation_instance(
    name: &str,
    author_id: Id,
    schema_id: Id,
    role_bindings: BTreeMap<String, Id>,
    space_id: Id,
    now: DateTime<Utc>,
) -> ConceptRecord {
    ConceptRecord {
        name: name.to_string(),
        created: now,
        last_modified: now,
        space_id,
        author_id,
        represented_by_id: None,
        schema_id: Some(schema_id),
        is_schema: false,
        literal_content: None,
        reference_content: Some(role_bindings),
    }
}
