pub mod agenda;
pub mod assign;
pub mod bucket;
pub mod friends;
pub mod goal;
pub mod order;
pub mod routine;
pub mod snapshot;
pub mod storage;
pub mod stream;
pub mod task;
pub mod tentative;
