use crate::{
    error::Error,
    mapper::{self, RowTarget},
    model::Table,
    query::{Condition, OrderBy, Predicate},
    record::Record,
    registry::Registry,
    session::{QueryHandle, RowCursor, Session},
    value::{Value, ValueSlot},
};
use std::{fmt, sync::Arc};

///
/// Command
///
/// Statement kinds this core renders. `Update` is reserved: rendering it
/// fails with `Error::InvalidCommand`.
///

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Command {
    #[default]
    Select,
    Insert,
    Delete,
    Update,
    Count,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Count => "count",
        };
        write!(f, "{label}")
    }
}

///
/// Statement
///
/// One-shot statement builder: accumulates command, table, conditions,
/// ordering, limit, TTL, and bound values through chained setters, renders
/// a single parameterized query on demand, and delegates execution to the
/// session collaborator.
///
/// Single-owner by construction: configured and consumed within one call
/// sequence, never shared.
///

pub struct Statement<'a, S: Session> {
    session: &'a S,
    registry: &'a Registry,
    command: Command,
    table: Arc<Table>,
    conditions: Vec<Condition>,
    orders: Vec<OrderBy>,
    limit: u32,
    ttl: u32,
    mapping: Option<Box<dyn RowTarget + 'a>>,
    values: Vec<Value>,
}

impl<'a, S: Session> Statement<'a, S> {
    #[must_use]
    pub fn new(session: &'a S, registry: &'a Registry) -> Self {
        Self {
            session,
            registry,
            command: Command::default(),
            table: Arc::new(Table::default()),
            conditions: Vec::new(),
            orders: Vec::new(),
            limit: 0,
            ttl: 0,
            mapping: None,
            values: Vec::new(),
        }
    }

    /// Set the command kind.
    #[must_use]
    pub fn command(mut self, command: Command) -> Self {
        self.command = command;
        self
    }

    /// Target a table by name, without column metadata.
    #[must_use]
    pub fn from(mut self, table: &str) -> Self {
        self.table = Arc::new(Table::named(table));
        self
    }

    /// Target the table registered for a record type.
    #[must_use]
    pub fn from_record<R: Record>(mut self) -> Self {
        self.table = mapper::table_of::<R>(self.registry);
        self
    }

    /// Set the WHERE conditions, replacing any previous set.
    #[must_use]
    pub fn filter(mut self, conditions: impl Into<Vec<Condition>>) -> Self {
        self.conditions = conditions.into();
        self
    }

    /// Set the ORDER BY list, replacing any previous set.
    #[must_use]
    pub fn order_by(mut self, orders: impl Into<Vec<OrderBy>>) -> Self {
        self.orders = orders.into();
        self
    }

    /// Bind a record's current field values, in column order, for a write.
    /// Also targets the record's table.
    #[must_use]
    pub fn bind<R: Record>(mut self, record: &R) -> Self {
        let bound = mapper::bind(self.registry, record);
        self.values = bound.values;
        self.table = bound.table;
        self
    }

    /// Map a record for decoding: `map_scan` and row cursors populate its
    /// fields in place by column name. Also targets the record's table.
    #[must_use]
    pub fn map<R: Record>(mut self, record: &'a mut R) -> Self {
        let mapping = mapper::ReadMap::new(self.registry, record);
        self.table = mapping.table_handle();
        self.mapping = Some(Box::new(mapping));
        self
    }

    /// Limit the number of rows returned (Select only; 0 means no limit).
    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = n;
        self
    }

    /// Per-write time-to-live in seconds (Insert only; 0 means none).
    #[must_use]
    pub fn ttl(mut self, seconds: u32) -> Self {
        self.ttl = seconds;
        self
    }

    /// Render the accumulated clauses into one parameterized query string
    /// plus the ordered argument list.
    pub fn render(&self) -> Result<(String, Vec<Value>), Error> {
        let mut cql: Vec<String> = Vec::new();
        let mut supports_ttl = false;

        match self.command {
            Command::Select => cql.push(format!("SELECT * FROM {}", self.table.name)),
            Command::Insert => {
                supports_ttl = true;
                cql.push(format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    self.table.name,
                    self.table.column_names(),
                    placeholders(self.table.columns.len())
                ));
            }
            Command::Delete => cql.push(format!("DELETE FROM {}", self.table.name)),
            Command::Count => cql.push(format!("SELECT COUNT(1) FROM {}", self.table.name)),
            Command::Update => return Err(Error::InvalidCommand(self.command)),
        }

        let mut args: Vec<Value> = Vec::new();

        if !self.conditions.is_empty() {
            cql.push("WHERE".to_string());
            for condition in &self.conditions {
                match condition.predicate {
                    Predicate::Eq => cql.push(format!("{} = ?", condition.column)),
                    Predicate::Gt => cql.push(format!("{} > ?", condition.column)),
                    Predicate::Ge => cql.push(format!("{} >= ?", condition.column)),
                    Predicate::Lt => cql.push(format!("{} < ?", condition.column)),
                    Predicate::Le => cql.push(format!("{} <= ?", condition.column)),
                    // Membership renders placeholders before the column
                    // name; that is this dialect's form, do not "fix" it.
                    Predicate::In => cql.push(format!(
                        "{} IN ({})",
                        placeholders(condition.values.len()),
                        condition.column
                    )),
                }

                match condition.predicate {
                    Predicate::In => args.extend(condition.values.iter().cloned()),
                    _ => args.push(condition.value.clone().unwrap_or(Value::Null)),
                }
            }
        }

        // Write values bind after all condition arguments.
        args.extend(self.values.iter().cloned());

        if self.command == Command::Select {
            if !self.orders.is_empty() {
                cql.push("ORDER BY".to_string());
                let orders = self
                    .orders
                    .iter()
                    .map(|o| format!("{} {}", o.column, o.direction))
                    .collect::<Vec<_>>();
                cql.push(orders.join(", "));
            }

            if self.limit > 0 {
                cql.push(format!("LIMIT {}", self.limit));
            }
        }

        if supports_ttl && self.ttl > 0 {
            cql.push(format!("USING TTL {}", self.ttl));
        }

        Ok((cql.join(" "), args))
    }

    /// Execute with no result rows.
    pub fn exec(self) -> Result<(), Error> {
        let (cql, args) = self.render()?;
        self.session.query(cql, args).exec()?;
        Ok(())
    }

    /// Execute and scan the first row positionally into `targets`.
    pub fn scan(self, targets: &mut [&mut dyn ValueSlot]) -> Result<(), Error> {
        let (cql, args) = self.render()?;
        self.session.query(cql, args).scan(targets)?;
        Ok(())
    }

    /// Execute and decode the first row into the record configured via
    /// [`map`](Self::map).
    ///
    /// # Panics
    /// Calling this without a mapped record is a programmer error.
    pub fn map_scan(mut self) -> Result<(), Error> {
        let (cql, args) = self.render()?;
        let mut mapping = self
            .mapping
            .take()
            .expect("map_scan requires a mapped record (call map first)");
        self.session.query(cql, args).map_scan(mapping.as_mut())?;
        Ok(())
    }

    /// Lazy row cursor: nothing is rendered or executed until the first
    /// advance.
    #[must_use]
    pub fn iter(self) -> Rows<'a, S> {
        Rows {
            statement: Some(self),
            cursor: None,
        }
    }
}

///
/// Rows
///
/// Forward-only, single-pass cursor over a statement's result rows. The
/// statement renders and executes on the first advance; each subsequent
/// advance decodes one row into the supplied target.
///

pub struct Rows<'a, S: Session> {
    statement: Option<Statement<'a, S>>,
    cursor: Option<<S::Query as QueryHandle>::Rows>,
}

impl<S: Session> Rows<'_, S> {
    /// Decode the next row into `target`. Returns `Ok(false)` once the
    /// cursor is exhausted. Rendering errors surface here, before any
    /// execution.
    pub fn fetch_next(&mut self, target: &mut dyn RowTarget) -> Result<bool, Error> {
        if self.cursor.is_none() {
            let Some(statement) = self.statement.take() else {
                return Ok(false);
            };
            let (cql, args) = statement.render()?;
            self.cursor = Some(statement.session.query(cql, args).rows()?);
        }

        let cursor = self.cursor.as_mut().expect("cursor initialized above");
        Ok(cursor.fetch_next(target)?)
    }
}

/// Exactly `n` comma-separated `?` markers; empty for `n = 0`.
#[must_use]
pub fn placeholders(n: usize) -> String {
    match n {
        0 => String::new(),
        1 => "?".to_string(),
        _ => "?,".repeat(n - 1) + "?",
    }
}
