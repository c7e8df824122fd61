mod condition;
mod statement;


pub use condition::{Condition, Direction, OrderBy, Predicate, asc, desc, eq, ge, gt, is_in, le, lt};
pub use statement::{Command, Rows, Statement, placeholders};
