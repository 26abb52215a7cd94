//! Graph assembly orchestration
//!
//! Stages run in strict dependency order, each fully materialized (ids
//! assigned by the store) before the next begins:
//!
//! 1. space
//! 2. accounts
//! 3. schema content + schema concepts (one batched call each)
//! 4. per node type: instance content + node concepts
//! 5. per relation type: relation concepts with resolved role bindings
//!
//! Node types and their instances are complete before any relation is built,
//! because relations reference node ids.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use rand::Rng;
use tracing::info;

use crate::batch::{write_batched, MAX_BATCH_SIZE};
use crate::config::{BenchSpec, RoleTarget};
use crate::error::{Result, SeederError};
use crate::generate::{
    make_accounts, make_content, make_node_instance, make_relation_instance, make_schema_concept,
    random_author, NameSource,
};
use crate::model::{Id, SpaceRecord};
use crate::store::StoreClient;

/// Generated ids for one run, by entity kind
#[derive(Debug, Clone)]
pub struct RunReport {
    pub space_id: Id,
    pub account_ids: Vec<Id>,
    /// Schema concept ids in declaration order (node types, then relations)
    pub schema_ids: Vec<(String, Id)>,
    pub node_ids_by_type: Vec<(String, Vec<Id>)>,
    pub relation_ids_by_type: Vec<(String, Vec<Id>)>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Space: {}", self.space_id)?;
        writeln!(f, "Accounts: {}", join_ids(&self.account_ids))?;
        let schemas: Vec<String> = self
            .schema_ids
            .iter()
            .map(|(name, id)| format!("{name}: {id}"))
            .collect();
        writeln!(f, "Schemas: {}", schemas.join(", "))?;
        for (name, ids) in &self.node_ids_by_type {
            writeln!(f, "{name} nodes: {}", join_ids(ids))?;
        }
        for (name, ids) in &self.relation_ids_by_type {
            writeln!(f, "{name} relations: {}", join_ids(ids))?;
        }
        Ok(())
    }
}

fn join_ids(ids: &[Id]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Picks a node id for a relation role from the accumulated instance index.
///
/// Multi-type roles draw the type first, then the instance: two-stage
/// uniform rather than uniform over the union, which deliberately biases
/// toward types with fewer instances.
pub struct RoleResolver<'a> {
    node_ids_by_type: &'a HashMap<String, Vec<Id>>,
}

impl<'a> RoleResolver<'a> {
    pub fn new(node_ids_by_type: &'a HashMap<String, Vec<Id>>) -> Self {
        Self { node_ids_by_type }
    }

    pub fn pick<R: Rng>(&self, target: &RoleTarget, rng: &mut R) -> Result<Id> {
        let candidates = target.candidates();
        let type_name = if candidates.len() > 1 {
            &candidates[rng.gen_range(0..candidates.len())]
        } else {
            candidates.first().ok_or_else(|| {
                SeederError::InvalidSpec("relation role with no target types".to_string())
            })?
        };

        let ids = self
            .node_ids_by_type
            .get(type_name.as_str())
            .filter(|ids| !ids.is_empty())
            .ok_or_else(|| SeederError::EmptyRoleType {
                type_name: type_name.clone(),
            })?;

        Ok(ids[rng.gen_range(0..ids.len())])
    }
}

/// Drives the generators and the batch writer against a store client
pub struct GraphAssembler<'a, S, R> {
    store: &'a mut S,
    rng: &'a mut R,
    max_batch_size: usize,
}

impl<'a, S: StoreClient, R: Rng> GraphAssembler<'a, S, R> {
    pub fn new(store: &'a mut S, rng: &'a mut R) -> Self {
        Self {
            store,
            rng,
            max_batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Override the per-call record limit (tests exercise small batches)
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Run the whole generation pipeline for `spec`
    pub fn run(&mut self, spec: &BenchSpec) -> Result<RunReport> {
        spec.validate()?;

        // Stage 1: space
        let space = SpaceRecord {
            url: spec.space.url.clone(),
            name: spec.space.name.clone(),
            platform: spec.space.platform.clone(),
        };
        let space_id = self.store.insert_space(&space)?;
        info!(space_id, "space created");

        // Stage 2: accounts
        let accounts = make_accounts(spec.accounts.count);
        let accounts = write_batched(accounts, self.max_batch_size, |chunk| {
            self.store.upsert_accounts(space_id, chunk)
        })?;
        let account_ids: Vec<Id> = accounts.iter().map(|a| a.id).collect();
        info!(count = account_ids.len(), "accounts created");

        // Stage 3: schema content + schema concepts
        let schema_names: Vec<String> = spec
            .nodes
            .iter()
            .map(|n| n.name.clone())
            .chain(spec.relations.iter().map(|r| r.name.clone()))
            .collect();
        let now = Utc::now();
        let schema_content = make_content(
            schema_names.len(),
            space_id,
            &account_ids,
            &NameSource::Explicit(&schema_names),
            now,
            &mut *self.rng,
        );
        let schema_content = write_batched(schema_content, self.max_batch_size, |chunk| {
            self.store.upsert_content(space_id, chunk)
        })?;

        let declared_roles: Vec<Vec<String>> = spec
            .nodes
            .iter()
            .map(|_| Vec::new())
            .chain(
                spec.relations
                    .iter()
                    .map(|r| r.roles.keys().cloned().collect()),
            )
            .collect();
        let schemata: Vec<_> = schema_names
            .iter()
            .zip(declared_roles)
            .zip(&schema_content)
            .map(|((name, roles), content)| {
                make_schema_concept(name, content, roles, space_id, now)
            })
            .collect();

        let schemata = write_batched(schemata, self.max_batch_size, |chunk| {
            self.store.upsert_concepts(space_id, chunk)
        })?;
        let schema_ids: Vec<(String, Id)> = schemata
            .iter()
            .map(|s| (s.record.name.clone(), s.id))
            .collect();
        let schema_id_by_name: HashMap<&str, Id> = schema_ids
            .iter()
            .map(|(name, id)| (name.as_str(), *id))
            .collect();
        info!(count = schema_ids.len(), "schema concepts created");

        // Stage 4: node instances, per type
        let mut node_ids_by_type: HashMap<String, Vec<Id>> = HashMap::new();
        let mut node_report = Vec::new();
        for node_type in &spec.nodes {
            let schema_id = schema_id_by_name[node_type.name.as_str()];
            let now = Utc::now();
            let content = make_content(
                node_type.count,
                space_id,
                &account_ids,
                &NameSource::Prefixed(&node_type.name),
                now,
                &mut *self.rng,
            );
            let content = write_batched(content, self.max_batch_size, |chunk| {
                self.store.upsert_content(space_id, chunk)
            })?;

            let nodes: Vec<_> = content
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    make_node_instance(
                        &format!("{}_{i}", node_type.name),
                        c,
                        schema_id,
                        space_id,
                        now,
                    )
                })
                .collect();
            let nodes = write_batched(nodes, self.max_batch_size, |chunk| {
                self.store.upsert_concepts(space_id, chunk)
            })?;

            let ids: Vec<Id> = nodes.iter().map(|n| n.id).collect();
            info!(node_type = %node_type.name, count = ids.len(), "nodes created");
            node_ids_by_type.insert(node_type.name.clone(), ids.clone());
            node_report.push((node_type.name.clone(), ids));
        }

        // Stage 5: relation instances, per type
        let resolver = RoleResolver::new(&node_ids_by_type);
        let mut relation_report = Vec::new();
        for relation_type in &spec.relations {
            let schema_id = schema_id_by_name[relation_type.name.as_str()];
            let now = Utc::now();

            let mut relations = Vec::with_capacity(relation_type.count);
            for i in 0..relation_type.count {
                let mut bindings = std::collections::BTreeMap::new();
                for (role, target) in &relation_type.roles {
                    bindings.insert(role.clone(), resolver.pick(target, &mut *self.rng)?);
                }
                relations.push(make_relation_instance(
                    &format!("{}_{i}", relation_type.name),
                    random_author(&account_ids, &mut *self.rng),
                    schema_id,
                    bindings,
                    space_id,
                    now,
                ));
            }

            let relations = write_batched(relations, self.max_batch_size, |chunk| {
                self.store.upsert_concepts(space_id, chunk)
            })?;
            let ids: Vec<Id> = relations.iter().map(|r| r.id).collect();
            info!(relation_type = %relation_type.name, count = ids.len(), "relations created");
            relation_report.push((relation_type.name.clone(), ids));
        }

        Ok(RunReport {
            space_id,
            account_ids,
            schema_ids,
            node_ids_by_type: node_report,
            relation_ids_by_type: relation_report,
        })
    }
}
