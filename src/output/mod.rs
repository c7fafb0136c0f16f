// Output formatting: terminal display of topic maps.

pub mod terminal;
