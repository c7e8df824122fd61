use crate::{
    error::SessionError,
    mapper::{RowTarget, table_of},
    model::FieldSpec,
    record::{FieldRead, FieldWrite, Record, bad_field_index},
    session::{QueryHandle, RowCursor, Session},
    value::{Value, ValueSlot},
};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

///
/// Account
///
/// Flat record: table name override, column defaults, an optional field,
/// and a skipped field.
///

#[derive(Debug, Default, PartialEq)]
pub(crate) struct Account {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: Option<String>,
    pub(crate) session_token: String,
}

impl Record for Account {
    const TYPE_NAME: &'static str = "Account";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id").table("accounts"),
        FieldSpec::new("name"),
        FieldSpec::new("email"),
        FieldSpec::new("session_token").skip(),
    ];

    fn field(&self, index: usize) -> FieldRead<'_> {
        match index {
            0 => FieldRead::Value(Value::from(self.id)),
            1 => FieldRead::Value(Value::from(self.name.clone())),
            2 => FieldRead::Value(Value::from(self.email.clone())),
            3 => FieldRead::Value(Value::from(self.session_token.clone())),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldWrite<'_> {
        match index {
            0 => FieldWrite::Slot(&mut self.id),
            1 => FieldWrite::Slot(&mut self.name),
            2 => FieldWrite::Slot(&mut self.email),
            3 => FieldWrite::Slot(&mut self.session_token),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }
}

///
/// Audit
///
/// Embeddable record; no annotations, so its key defaults to the first
/// column.
///

#[derive(Debug, Default, PartialEq)]
pub(crate) struct Audit {
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}

impl Record for Audit {
    const TYPE_NAME: &'static str = "Audit";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("created_at"),
        FieldSpec::new("updated_at"),
    ];

    fn field(&self, index: usize) -> FieldRead<'_> {
        match index {
            0 => FieldRead::Value(Value::from(self.created_at)),
            1 => FieldRead::Value(Value::from(self.updated_at)),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldWrite<'_> {
        match index {
            0 => FieldWrite::Slot(&mut self.created_at),
            1 => FieldWrite::Slot(&mut self.updated_at),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }
}

///
/// Tournament
///
/// Embeds `Audit` at field 0; its own table/key annotations take precedence
/// over what the embedded record would contribute.
///

#[derive(Debug, Default, PartialEq)]
pub(crate) struct Tournament {
    pub(crate) audit: Audit,
    pub(crate) id: i64,
    pub(crate) title: String,
}

impl Record for Tournament {
    const TYPE_NAME: &'static str = "Tournament";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("audit").embedded(table_of::<Audit>),
        FieldSpec::new("id").table("tournaments").key("id"),
        FieldSpec::new("title").column("name"),
    ];

    fn field(&self, index: usize) -> FieldRead<'_> {
        match index {
            0 => FieldRead::Record(&self.audit),
            1 => FieldRead::Value(Value::from(self.id)),
            2 => FieldRead::Value(Value::from(self.title.clone())),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldWrite<'_> {
        match index {
            0 => FieldWrite::Record(&mut self.audit),
            1 => FieldWrite::Slot(&mut self.id),
            2 => FieldWrite::Slot(&mut self.title),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }
}

///
/// Redacted
///
/// Every field skipped: registers an empty table.
///

#[derive(Debug, Default)]
pub(crate) struct Redacted {
    pub(crate) hidden: String,
}

impl Record for Redacted {
    const TYPE_NAME: &'static str = "Redacted";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::new("hidden").skip()];

    fn field(&self, index: usize) -> FieldRead<'_> {
        match index {
            0 => FieldRead::Value(Value::from(self.hidden.clone())),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldWrite<'_> {
        match index {
            0 => FieldWrite::Slot(&mut self.hidden),
            _ => bad_field_index(Self::TYPE_NAME, index),
        }
    }
}

///
/// FakeSession
///
/// In-memory session collaborator: logs every rendered (query, args) pair
/// and serves canned rows. `failing` turns every terminal into an
/// execution error so pass-through can be asserted.
///

#[derive(Default)]
pub(crate) struct FakeSession {
    log: Rc<RefCell<Vec<(String, Vec<Value>)>>>,
    named_rows: RefCell<VecDeque<Vec<(String, Value)>>>,
    scan_rows: RefCell<VecDeque<Vec<Value>>>,
    fail_with: Option<String>,
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn push_named_row(&self, row: Vec<(&str, Value)>) {
        self.named_rows.borrow_mut().push_back(
            row.into_iter()
                .map(|(col, value)| (col.to_string(), value))
                .collect(),
        );
    }

    pub(crate) fn push_scan_row(&self, row: Vec<Value>) {
        self.scan_rows.borrow_mut().push_back(row);
    }

    pub(crate) fn queries(&self) -> Vec<(String, Vec<Value>)> {
        self.log.borrow().clone()
    }
}

impl Session for FakeSession {
    type Query = FakeQuery;

    fn query(&self, cql: String, args: Vec<Value>) -> Self::Query {
        FakeQuery {
            log: Rc::clone(&self.log),
            cql,
            args,
            named_rows: self.named_rows.borrow_mut().drain(..).collect(),
            scan_rows: self.scan_rows.borrow_mut().drain(..).collect(),
            fail_with: self.fail_with.clone(),
        }
    }
}

pub(crate) struct FakeQuery {
    log: Rc<RefCell<Vec<(String, Vec<Value>)>>>,
    cql: String,
    args: Vec<Value>,
    named_rows: VecDeque<Vec<(String, Value)>>,
    scan_rows: VecDeque<Vec<Value>>,
    fail_with: Option<String>,
}

impl FakeQuery {
    fn record(&self) -> Result<(), SessionError> {
        self.log.borrow_mut().push((self.cql.clone(), self.args.clone()));
        match &self.fail_with {
            Some(message) => Err(SessionError::message(message.clone())),
            None => Ok(()),
        }
    }
}

impl QueryHandle for FakeQuery {
    type Rows = FakeRows;

    fn exec(self) -> Result<(), SessionError> {
        self.record()
    }

    fn scan(self, targets: &mut [&mut dyn ValueSlot]) -> Result<(), SessionError> {
        self.record()?;
        let Some(row) = self.scan_rows.front() else {
            return Ok(());
        };
        for (target, value) in targets.iter_mut().zip(row.iter().cloned()) {
            target.store(value).map_err(SessionError::new)?;
        }
        Ok(())
    }

    fn map_scan(self, target: &mut dyn RowTarget) -> Result<(), SessionError> {
        self.record()?;
        let Some(row) = self.named_rows.front() else {
            return Ok(());
        };
        for (column, value) in row.iter().cloned() {
            target.set(&column, value).map_err(SessionError::new)?;
        }
        Ok(())
    }

    fn rows(self) -> Result<Self::Rows, SessionError> {
        self.record()?;
        Ok(FakeRows {
            rows: self.named_rows,
        })
    }
}

pub(crate) struct FakeRows {
    rows: VecDeque<Vec<(String, Value)>>,
}

impl RowCursor for FakeRows {
    fn fetch_next(&mut self, target: &mut dyn RowTarget) -> Result<bool, SessionError> {
        let Some(row) = self.rows.pop_front() else {
            return Ok(false);
        };
        for (column, value) in row {
            target.set(&column, value).map_err(SessionError::new)?;
        }
        Ok(true)
    }
}
