//! In-memory model of a device class.
//!
//! The model is built by an editing or loading collaborator, mutated by
//! editing operations, and read (never mutated) by the generation pipeline.
//!
//! ```text
//! ClassDescription ──ancestors──▶ Arc<ClassDescription> ──▶ ...
//!   ├── ClassMetadata (title, description, copyright, license, identification)
//!   ├── Attribute / Command / Property (class, device) / Pipe
//!   └── StateMachine (states + allowed states per member)
//! ```

mod class;
mod language;
mod members;
mod server;
mod state_machine;

pub use class::{
    CURRENT_SCHEMA_REVISION, ClassDescription, ClassMetadata, Identification,
};
pub use language::{License, TargetLanguage};
pub use members::{
    Argument, AttrFormat, AttrWriteType, Attribute, Command, DataType, Member, MemberKind, Pipe,
    PipeWriteType, Property,
};
pub use server::ServerDescription;
pub use state_machine::{MemberKey, State, StateMachine};
