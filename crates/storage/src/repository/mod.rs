pub mod boxer;
