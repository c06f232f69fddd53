pub mod designators;
