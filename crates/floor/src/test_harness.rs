//! # TestFloor: headless integration test harness
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` and [`FloorPlugin`] so the
//! full frame schedule (pointer, commands, signals, audit) can be driven
//! without a window or renderer.

use std::time::Duration;

use bevy::app::App;
use bevy::ecs::event::Events;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::{FloorSettings, PlannerConfig};
use crate::furniture::{FurnitureId, FurnitureTemplate};
use crate::invariant_checks::OccupancyViolations;
use crate::pointer::PointerFrame;
use crate::{CameraMovement, Floor, FloorCommand, FloorPlugin};

/// Simulated frame length.
pub const FRAME: Duration = Duration::from_millis(100);

pub struct TestFloor {
    app: App,
}

impl TestFloor {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A 10x10 room with default settings.
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Self::with_config(PlannerConfig {
            floor: FloorSettings {
                grid_width: width,
                grid_height: height,
                ..FloorSettings::default()
            },
            ..PlannerConfig::default()
        })
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
        // Before FloorPlugin so it sizes the floor from this config.
        app.insert_resource(config);
        app.add_plugins(FloorPlugin);

        // Run one update so Startup systems execute.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Floor setup (builder pattern)
    // -----------------------------------------------------------------------

    /// Place a committed piece. Panics if it does not fit.
    pub fn with_furniture(mut self, template: impl Into<FurnitureTemplate>, anchor: IVec2) -> Self {
        let template = template.into();
        if let Err(err) = self.floor_mut().place(template, anchor) {
            panic!("cannot place {:?} at {anchor}: {err}", template.kind);
        }
        self
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run `n` frames of [`FRAME`] each.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn send(&mut self, command: FloorCommand) {
        self.app.world_mut().send_event(command);
    }

    /// Set the pointer state the floor sees on following frames.
    pub fn set_pointer(&mut self, frame: PointerFrame) {
        *self.app.world_mut().resource_mut::<PointerFrame>() = frame;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn floor(&self) -> &Floor {
        self.app.world().resource::<Floor>()
    }

    pub fn floor_mut(&mut self) -> Mut<'_, Floor> {
        self.app.world_mut().resource_mut::<Floor>()
    }

    pub fn selected(&self) -> Option<FurnitureId> {
        self.floor().selected()
    }

    pub fn camera_movement_allowed(&self) -> bool {
        self.app.world().resource::<CameraMovement>().allowed
    }

    pub fn violations(&self) -> OccupancyViolations {
        *self.app.world().resource::<OccupancyViolations>()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    /// Take every pending event of type `E`, oldest first.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.app
            .world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

impl Default for TestFloor {
    fn default() -> Self {
        Self::new()
    }
}
