//! ECS components for entities.
//!
//! An entity's capabilities are the components it carries: anything with
//! [`transform::Transforms`] is drawn interpolated, anything with a
//! [`collider::Collider`] and [`collision::Collisions`] takes part in
//! collision detection, and a [`character::CharacterController`] makes it a
//! playable character.
//!
//! Submodules overview:
//! - [`animation`] – frame sets and a keyed animation player
//! - [`character`] – character states, tuning and movement integration
//! - [`collider`] – the shape an entity collides with
//! - [`collision`] – per-entity set of shapes it currently touches
//! - [`rigidbody`] – velocity and the gravity switch
//! - [`sprite`] – texture region drawn at the entity's position
//! - [`tag`] – human-readable name for logs and the inspector
//! - [`transform`] – previous/current/interpolated transforms

pub mod animation;
pub mod character;
pub mod collider;
pub mod collision;
pub mod rigidbody;
pub mod sprite;
pub mod tag;
pub mod transform;
