//! Command identity - the type-token routing key

use std::any::{Any, TypeId, type_name};
use std::fmt;

/// An opaque command value.
///
/// No shape is imposed beyond a distinguishable type identity: any `'static`
/// value can be dispatched. The bus never mutates a command and never retains
/// it beyond the duration of one dispatch call.
pub trait Command: Any {
    /// Upcast for handler-side downcasting to the concrete command type.
    fn as_any(&self) -> &dyn Any;
}

impl<C: Any> Command for C {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Routing identity of a command type.
///
/// Keyed on [`TypeId`]; the captured type name is carried for log and error
/// text only and takes no part in equality or hashing.
#[derive(Clone, Copy, Debug)]
pub struct CommandKind {
    id: TypeId,
    name: &'static str,
}

impl CommandKind {
    /// Identity of the concrete command type `C`.
    pub fn of<C: Any>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// Underlying type token.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, for compact log fields.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for CommandKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CommandKind {}

impl std::hash::Hash for CommandKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
