mod expansion_map;

pub use expansion_map::ExpansionMap;
