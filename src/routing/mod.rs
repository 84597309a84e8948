pub mod astar;
pub mod genetic;

pub use astar::a_star;
pub use genetic::genetic_algorithm_for_tsp;
