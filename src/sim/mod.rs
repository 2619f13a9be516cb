//! Game session controller
//!
//! All gameplay logic lives here, written against the `HostEngine` trait:
//! - One explicit `GameState` per session, passed to every handler
//! - Contact participants classified by role at body creation
//! - No rendering or platform dependencies

pub mod body;
pub mod engine;
pub mod placement;
pub mod scoring;
pub mod session;
pub mod state;
pub mod throw;

pub use body::{BodyDesc, BodyId, BodyKind, BodyRole, CollisionFilter, SensorKind, Shape, VisualId};
pub use engine::{
    AnchorId, AssetBox, CameraFrame, ContactPair, HitResult, HoopAsset, HostEngine, PlaneAnchor,
    SurfaceVisualDesc, TrackingConfig,
};
pub use placement::{place_hoop, visualize_surface};
pub use scoring::{ContactOutcome, classify, on_contact_begin};
pub use session::{EventOutcome, HostEvent, TapOutcome, handle_event, handle_tap};
pub use state::{Ball, BallPhase, GameEvent, GameState, Hoop, ScoreState, SessionPhase, SurfaceVisual};
pub use throw::spawn_ball;
