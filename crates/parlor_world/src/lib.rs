//! World model for Parlor.
//!
//! This crate provides:
//! - [`Thing`] - The single physical entity type (tag + capabilities)
//! - [`Room`] / [`Connector`] - Locations and the edges between them
//! - [`World`] - The arena, containment tree, and noun dictionary
//! - [`Topic`] / [`ActorData`] - Conversation and commerce state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod room;
mod thing;
mod topic;
mod world;

pub use room::{Connector, ConnectorKind, Exit, Face, Room};
pub use thing::{ContainKind, Holder, Posture, Thing, ThingKind};
pub use topic::{ActorData, BuyItem, ConversationKind, SaleItem, Stock, Topic};
pub use world::{PlacementNode, World, WorldState};
