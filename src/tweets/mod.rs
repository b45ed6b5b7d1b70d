// Tweet table input: the record type, CSV loading, and the entities parser.

pub mod entities;
pub mod record;
