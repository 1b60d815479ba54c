mod ordered;

pub use ordered::OrderedTable;
