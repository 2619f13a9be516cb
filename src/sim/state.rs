//! Session state and core game types
//!
//! Everything the controller mutates lives in `GameState`, which is passed
//! to each handler explicitly.

use std::collections::{BTreeMap, HashMap};

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use super::body::{BodyId, BodyRole, SensorKind, VisualId};
use super::engine::AnchorId;
use crate::display::ScoreReadout;

/// Lifecycle of the AR session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, tracking not yet started
    Idle,
    /// Tracking and physics running
    Running,
    /// Tracking paused (view hidden)
    Paused,
}

/// Scoring progress of a single ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    /// In flight, no sensor touched yet
    Spawned,
    /// Entered the top sensor at least once
    ToppedOut,
    /// Reached the bottom sensor after the top one; counted
    Scored,
    /// Reached the bottom sensor without passing the top one
    Unscored,
}

impl BallPhase {
    /// Terminal phases ignore every further contact
    pub fn is_terminal(&self) -> bool {
        matches!(self, BallPhase::Scored | BallPhase::Unscored)
    }
}

/// A thrown basketball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub body: BodyId,
    pub phase: BallPhase,
    /// Camera pose at spawn
    pub spawn_transform: Mat4,
}

/// The placed hoop and its sensors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hoop {
    pub body: BodyId,
    pub transform: Mat4,
    pub top_sensor: BodyId,
    pub bottom_sensor: BodyId,
    /// Anchor of the surface the hoop was placed on
    pub anchor: AnchorId,
}

/// A wall rectangle drawn for a detected surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceVisual {
    pub anchor: AnchorId,
    pub visual: VisualId,
    pub extent: Vec2,
}

/// Made/thrown counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    /// Successful baskets
    pub points: u32,
    /// Total balls spawned
    pub thrown: u32,
}

impl ScoreState {
    pub fn readout(&self) -> ScoreReadout {
        ScoreReadout {
            made: self.points,
            thrown: self.thrown,
        }
    }
}

/// Things that happened during a handler call, drained by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SurfaceVisualized { anchor: AnchorId },
    WallsCleared { count: usize },
    HoopPlaced { anchor: AnchorId },
    BallThrown { ball: u32 },
    RimEntered { ball: u32 },
    Basket { ball: u32 },
    Miss { ball: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: SessionPhase,
    pub score: ScoreState,
    /// Placed hoop; `Some` is irreversible for the session
    pub hoop: Option<Hoop>,
    /// Thrown balls by id; never removed
    pub balls: BTreeMap<u32, Ball>,
    /// Wall rectangles still in the scene
    pub surfaces: Vec<SurfaceVisual>,
    /// Number of surface visualizations ever created
    pub surfaces_visualized: u32,
    /// Contact classification, filled in when bodies are created
    roles: HashMap<BodyId, BodyRole>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next ball ID
    next_ball_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: ScoreState::default(),
            hoop: None,
            balls: BTreeMap::new(),
            surfaces: Vec::new(),
            surfaces_visualized: 0,
            roles: HashMap::new(),
            events: Vec::new(),
            next_ball_id: 1,
        }
    }

    pub fn is_hoop_placed(&self) -> bool {
        self.hoop.is_some()
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_ball_id;
        self.next_ball_id += 1;
        id
    }

    /// Record the contact role of a freshly created body
    pub fn register_body(&mut self, body: BodyId, role: BodyRole) {
        self.roles.insert(body, role);
    }

    pub fn role_of(&self, body: BodyId) -> Option<BodyRole> {
        self.roles.get(&body).copied()
    }

    /// Sensor kind of a body, if it is one of the hoop's sensors
    pub fn sensor_of(&self, body: BodyId) -> Option<SensorKind> {
        match self.role_of(body)? {
            BodyRole::Sensor(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.get(&id)
    }

    pub fn ball_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.balls.get_mut(&id)
    }

    pub fn surface_for(&self, anchor: AnchorId) -> Option<&SurfaceVisual> {
        self.surfaces.iter().find(|s| s.anchor == anchor)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
