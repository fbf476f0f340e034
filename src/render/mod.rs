//! Interface rendering module
//!
//! Turns named object types into `interface` declarations. Array and union
//! types are never declared separately; their readable form is inlined
//! wherever they are referenced.
//!
//! A field typed `T | null` is written as an optional `T`, and a field that is
//! only ever `null` is written as an optional `any`.

mod interface;

pub use interface::{describe_interfaces, render, InterfaceDescription};
