pub mod symmetric_key;
