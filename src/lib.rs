//! Graph Seeder
//!
//! Synthesizes a graph-shaped benchmark dataset (accounts, content records,
//! typed concept nodes, and typed relations between them) inside a relational
//! store, driven by a declarative YAML spec of entity counts and relation
//! roles. Downstream graph/knowledge-base query layers can then be
//! load-tested against realistic, referentially-consistent volumes.
//!
//! ## Pipeline
//!
//! ```text
//! spec.yaml -> GraphAssembler
//!                ├─ space
//!                ├─ accounts
//!                ├─ schema content + schema concepts
//!                ├─ node content + node concepts   (per node type)
//!                └─ relation concepts              (per relation type,
//!                                                   roles resolved against
//!                                                   generated node ids)
//! ```
//!
//! Every stage is fully materialized (ids assigned by the store) before the
//! next begins. Ids come exclusively from the store; the batch writer's
//! order-preservation contract maps them 1:1 onto submitted records.

pub mod assembler;
pub mod batch;
pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod store;

pub use assembler::{GraphAssembler, RoleResolver, RunReport};
pub use batch::{write_batched, MAX_BATCH_SIZE};
pub use config::{BenchSpec, NodeTypeSpec, RelationTypeSpec, RoleTarget};
pub use error::{Result, SeederError};
pub use model::{AccountRecord, ConceptRecord, ContentRecord, Id, Persisted, SpaceRecord};
pub use store::{PsqlClient, StoreClient};
