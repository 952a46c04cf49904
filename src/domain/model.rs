//! Wire messages for the `data.DB` service.
//!
//! These mirror the service's protobuf schema and are declared directly with
//! `prost` derives, so no `protoc` step is needed at build time.

use std::fmt;

/// Entity kinds known to the data service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Kind {
    Unspecified = 0,
    Task = 1,
}

impl Kind {
    /// Protobuf name of the variant.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Kind::Unspecified => "KIND_UNSPECIFIED",
            Kind::Task => "TASK",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Task {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

/// Envelope the service uses for any stored entity.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Record {
    #[prost(enumeration = "Kind", tag = "1")]
    pub kind: i32,
    #[prost(message, optional, tag = "2")]
    pub task: Option<Task>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(enumeration = "Kind", tag = "1")]
    pub kind: i32,
    #[prost(string, repeated, tag = "2")]
    pub orders: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Mutation {
    #[prost(enumeration = "Op", tag = "1")]
    pub op: i32,
    #[prost(message, optional, tag = "2")]
    pub record: Option<Record>,
}

/// Mutation operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Op {
    Unspecified = 0,
    Create = 1,
    Delete = 2,
}

impl Op {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Op::Unspecified => "OP_UNSPECIFIED",
            Op::Create => "CREATE",
            Op::Delete => "DELETE",
        }
    }
}

impl Record {
    /// Wrap a task in a TASK record.
    pub fn task(task: Task) -> Self {
        Self {
            kind: Kind::Task as i32,
            task: Some(task),
        }
    }

    /// Decoded kind; values this client does not know read as `Unspecified`.
    pub fn record_kind(&self) -> Kind {
        Kind::try_from(self.kind).unwrap_or(Kind::Unspecified)
    }
}

impl Query {
    /// All records of `kind`, ordered by the given fields.
    pub fn ordered(kind: Kind, orders: &[&str]) -> Self {
        Self {
            kind: kind as i32,
            orders: orders.iter().map(|field| field.to_string()).collect(),
        }
    }

    /// All tasks, ordered by name.
    pub fn tasks_by_name() -> Self {
        Self::ordered(Kind::Task, &["name"])
    }
}

impl Mutation {
    pub fn create_task(name: impl Into<String>) -> Self {
        Self {
            op: Op::Create as i32,
            record: Some(Record::task(Task {
                id: String::new(),
                name: name.into(),
            })),
        }
    }

    pub fn delete_task(id: impl Into<String>) -> Self {
        Self {
            op: Op::Delete as i32,
            record: Some(Record::task(Task {
                id: id.into(),
                name: String::new(),
            })),
        }
    }

    pub fn mutation_op(&self) -> Op {
        Op::try_from(self.op).unwrap_or(Op::Unspecified)
    }

    /// The task carried by this mutation, if any.
    pub fn target_task(&self) -> Option<&Task> {
        self.record.as_ref().and_then(|record| record.task.as_ref())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{:?} name:{:?}", self.id, self.name)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind:{}", self.record_kind().as_str_name())?;
        if let Some(task) = &self.task {
            write!(f, " task:<{}>", task)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_tasks_by_name_query() {
        let query = Query::tasks_by_name();
        assert_eq!(query.kind, Kind::Task as i32);
        assert_eq!(query.orders, vec!["name".to_string()]);
    }

    #[test]
    fn test_create_mutation_carries_only_name() {
        let mutation = Mutation::create_task("foo");
        assert_eq!(mutation.mutation_op(), Op::Create);

        let record = mutation.record.as_ref().unwrap();
        assert_eq!(record.record_kind(), Kind::Task);
        assert_eq!(mutation.target_task().unwrap().name, "foo");
        assert!(mutation.target_task().unwrap().id.is_empty());
    }

    #[test]
    fn test_delete_mutation_carries_only_id() {
        let mutation = Mutation::delete_task("abc");
        assert_eq!(mutation.mutation_op(), Op::Delete);
        assert_eq!(mutation.target_task().unwrap().id, "abc");
        assert!(mutation.target_task().unwrap().name.is_empty());
    }

    #[test]
    fn test_record_display() {
        let record = Record::task(Task {
            id: "1".to_string(),
            name: "write \"docs\"".to_string(),
        });
        assert_eq!(
            record.to_string(),
            r#"kind:TASK task:<id:"1" name:"write \"docs\"">"#
        );
    }

    #[test]
    fn test_record_display_without_task() {
        let record = Record {
            kind: 42,
            task: None,
        };
        assert_eq!(record.to_string(), "kind:KIND_UNSPECIFIED");
    }

    #[test]
    fn test_mutation_wire_encoding() {
        let mutation = Mutation::delete_task("x");
        let bytes = mutation.encode_to_vec();
        let decoded = Mutation::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, mutation);
    }
}
