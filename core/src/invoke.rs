//! Calling a bound method on a live candidate instance.

use std::fmt;

use crate::capability::Capability;
use crate::check;
use crate::container::{SortedContainer, Value};
use crate::error::CheckFailure;
use crate::mixed::{MixedKind, MixedMachine};

/// The method a scenario invokes once per iteration (the bound `func`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Add,
    Update,
    Contains,
    Remove,
    DelItem,
    Bisect,
    GetItem,
    Pop,
    Index,
    Iter,
    Count,
    /// One step of a mixed workload.
    Run,
}

/// Shape of the argument a method takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    None,
    Value,
    Position,
    Values,
    Traversal,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Add => "add",
            Method::Update => "update",
            Method::Contains => "contains",
            Method::Remove => "remove",
            Method::DelItem => "delete_at",
            Method::Bisect => "bisect_left",
            Method::GetItem => "get",
            Method::Pop => "pop",
            Method::Index => "index_of",
            Method::Iter => "iter",
            Method::Count => "count",
            Method::Run => "run",
        }
    }

    pub fn arg_kind(self) -> ArgKind {
        match self {
            Method::Add | Method::Contains | Method::Remove | Method::Bisect | Method::Index | Method::Count => {
                ArgKind::Value
            }
            Method::Run => ArgKind::Value,
            Method::DelItem | Method::GetItem => ArgKind::Position,
            Method::Update => ArgKind::Values,
            Method::Pop => ArgKind::None,
            Method::Iter => ArgKind::Traversal,
        }
    }

    /// Capability the method needs on the container; `Run` depends on the machine.
    pub fn capability(self) -> Option<Capability> {
        Some(match self {
            Method::Add => Capability::Add,
            Method::Update => Capability::Update,
            Method::Contains => Capability::Contains,
            Method::Remove => Capability::Remove,
            Method::DelItem => Capability::DelItem,
            Method::Bisect => Capability::Bisect,
            Method::GetItem => Capability::GetItem,
            Method::Pop => Capability::Pop,
            Method::Index => Capability::Index,
            Method::Iter => Capability::Iter,
            Method::Count => Capability::Count,
            Method::Run => return None,
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    None,
    Value(Value),
    Position(usize),
    Values(&'a [Value]),
}

impl Arg<'_> {
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::None => ArgKind::None,
            Arg::Value(_) => ArgKind::Value,
            Arg::Position(_) => ArgKind::Position,
            Arg::Values(_) => ArgKind::Values,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Unit,
    Bool(bool),
    Value(Option<Value>),
    Position(Option<usize>),
    Count(usize),
}

impl Reply {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Reply::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_value(self) -> Option<Value> {
        match self {
            Reply::Value(v) => v,
            _ => None,
        }
    }

    pub fn as_position(self) -> Option<usize> {
        match self {
            Reply::Position(p) => p,
            _ => None,
        }
    }

    pub fn as_count(self) -> Option<usize> {
        match self {
            Reply::Count(n) => Some(n),
            _ => None,
        }
    }
}

/// A freshly constructed candidate, optionally wrapped by a mixed workload.
#[derive(Debug)]
pub enum Instance {
    Plain(Box<dyn SortedContainer>),
    Mixed(MixedMachine),
}

impl Instance {
    pub fn new(obj: Box<dyn SortedContainer>, mixed: Option<MixedKind>) -> Self {
        match mixed {
            Some(kind) => Instance::Mixed(MixedMachine::new(kind, obj)),
            None => Instance::Plain(obj),
        }
    }

    pub fn container(&self) -> &dyn SortedContainer {
        match self {
            Instance::Plain(obj) => obj.as_ref(),
            Instance::Mixed(machine) => machine.container(),
        }
    }

    pub fn container_mut(&mut self) -> &mut dyn SortedContainer {
        match self {
            Instance::Plain(obj) => obj.as_mut(),
            Instance::Mixed(machine) => machine.container_mut(),
        }
    }

    pub fn len(&self) -> usize {
        self.container().len()
    }

    pub fn is_empty(&self) -> bool {
        self.container().is_empty()
    }

    pub fn update(&mut self, values: &[Value]) {
        match self {
            Instance::Plain(obj) => obj.update(values),
            Instance::Mixed(machine) => machine.update(values),
        }
    }

    pub fn call(&mut self, method: Method, arg: Arg<'_>) -> Result<Reply, CheckFailure> {
        if let (Method::Run, Arg::Value(value)) = (method, arg) {
            let Instance::Mixed(machine) = self else {
                return Err(CheckFailure::new("run called on an instance without a mixed workload"));
            };
            machine.run(value)?;
            return Ok(Reply::Unit);
        }

        let obj = self.container_mut();
        let reply = match (method, arg) {
            (Method::Add, Arg::Value(v)) => {
                obj.add(v);
                Reply::Unit
            }
            (Method::Update, Arg::Values(values)) => {
                obj.update(values);
                Reply::Unit
            }
            (Method::Contains, Arg::Value(v)) => Reply::Bool(obj.contains(v)),
            (Method::Remove, Arg::Value(v)) => {
                check!(obj.remove(v), "remove({}) found no such value", v);
                Reply::Unit
            }
            (Method::DelItem, Arg::Position(pos)) => {
                check!(obj.delete_at(pos).is_some(), "delete_at({}) out of range", pos);
                Reply::Unit
            }
            (Method::Bisect, Arg::Value(v)) => Reply::Position(Some(obj.bisect_left(v))),
            (Method::GetItem, Arg::Position(pos)) => Reply::Value(obj.get(pos)),
            (Method::Pop, Arg::None) => Reply::Value(obj.pop()),
            (Method::Index, Arg::Value(v)) => Reply::Position(obj.index_of(v)),
            (Method::Count, Arg::Value(v)) => Reply::Count(obj.count(v)),
            (method, arg) => {
                return Err(CheckFailure::new(format!(
                    "{} does not accept a {:?} argument",
                    method,
                    arg.kind()
                )));
            }
        };
        Ok(reply)
    }
}

/// A method bound to one instance, handed to a workload.
pub struct Func<'a> {
    instance: &'a mut Instance,
    method: Method,
}

impl<'a> Func<'a> {
    pub fn new(instance: &'a mut Instance, method: Method) -> Self {
        Self { instance, method }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn call(&mut self, arg: Arg<'_>) -> Result<Reply, CheckFailure> {
        self.instance.call(self.method, arg)
    }

    /// Ascending traversal; only valid for [`Method::Iter`].
    pub fn iterate(&mut self) -> Result<Box<dyn Iterator<Item = Value> + '_>, CheckFailure> {
        if self.method != Method::Iter {
            return Err(CheckFailure::new(format!("{} is not a traversal", self.method)));
        }
        Ok(self.instance.container().iter())
    }
}
