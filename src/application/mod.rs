pub mod fortune;
