pub mod context;
pub mod schema;
pub mod taxonomy;

pub use context::{Axis, AxisKind, Context, Entity, Fact, Period};
pub use schema::{
    COL_DATE, COL_END_DATE, COL_ENTITY_ID, COL_FILING_ID, COL_START_DATE, ColumnSpec,
    SemanticType, TableSchema,
};
pub use taxonomy::{Concept, LinkRole, PeriodType, Taxonomy};
