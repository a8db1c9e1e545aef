pub mod calculators;
