use bevy::{color::LinearRgba, gizmos::gizmos::Gizmos, math::Vec3, reflect::Reflect};

pub const PROBE_COLOR: LinearRgba = LinearRgba::GREEN;
pub const NORMAL_COLOR: LinearRgba = LinearRgba::RED;

/// Debug draw commands recorded by the solver, replayed onto [`Gizmos`] later.
///
/// The solver runs outside of any system that has access to [`Gizmos`], and possibly
/// several times per rendered frame. The queue holds the commands of the latest
/// simulation step and can be replayed any number of times.
#[derive(Clone, Reflect, Default, Debug)]
pub struct DeferredGizmos {
    commands: Vec<DeferredGizmoCommand>,
}

impl DeferredGizmos {
    pub fn apply(&self, gizmos: &mut Gizmos) {
        for command in &self.commands {
            command.apply(gizmos);
        }
    }

    pub fn line(&mut self, start: Vec3, end: Vec3, color: LinearRgba) {
        self.commands
            .push(DeferredGizmoCommand::Line(start, end, color));
    }

    pub fn ray(&mut self, origin: Vec3, direction: Vec3, color: LinearRgba) {
        self.commands
            .push(DeferredGizmoCommand::Ray(origin, direction, color));
    }

    pub fn commands(&self) -> &[DeferredGizmoCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[derive(Clone, Copy, Reflect, Debug, PartialEq)]
pub enum DeferredGizmoCommand {
    Line(Vec3, Vec3, LinearRgba),
    Ray(Vec3, Vec3, LinearRgba),
}

impl DeferredGizmoCommand {
    pub fn apply(&self, gizmos: &mut Gizmos) {
        match *self {
            DeferredGizmoCommand::Line(start, end, color) => {
                gizmos.line(start, end, color);
            }
            DeferredGizmoCommand::Ray(origin, direction, color) => {
                gizmos.ray(origin, direction, color);
            }
        }
    }
}
