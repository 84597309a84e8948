//! Genetic algorithm approximating a minimum-length cyclic tour over a set
//! of points (TSP). A gene is a point's position in the route; a chromosome
//! is a full route, compared by total cyclic length.

use std::time::{Duration, Instant};

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use crate::spatial::point::Point;

const POPULATION_SIZE: usize = 50;
const CROSSOVER_SIZE: usize = 30;
const MUTATION_SIZE: usize = 15;
const INFUSED_SIZE: usize = 5;

type Chromosome = Vec<Point>;

/// best cyclic tour found within `time_limit`; returns `genes` unordered
/// (as given) when there are 3 or fewer, since every ordering of 3 or
/// fewer points has the same cyclic length.
pub fn genetic_algorithm_for_tsp(genes: &[Point], time_limit: Duration) -> Chromosome {
    genetic_algorithm_for_tsp_with_rng(genes, time_limit, &mut rand::rng())
}

pub fn genetic_algorithm_for_tsp_with_rng<R: Rng>(
    genes: &[Point],
    time_limit: Duration,
    rng: &mut R,
) -> Chromosome {
    if genes.len() <= 3 {
        return genes.to_vec();
    }

    let mut population: Vec<Chromosome> = (0..POPULATION_SIZE)
        .map(|_| shuffled(genes, rng))
        .collect();

    let deadline = Instant::now() + time_limit;
    let mut answer: Option<Chromosome> = None;

    while Instant::now() <= deadline {
        let mut created = Vec::with_capacity(CROSSOVER_SIZE + MUTATION_SIZE + INFUSED_SIZE);

        for _ in 0..CROSSOVER_SIZE {
            let pair = population.iter().choose_multiple(rng, 2);
            created.push(crossover(pair[0], pair[1]));
        }

        for chromosome in population.iter().choose_multiple(rng, MUTATION_SIZE) {
            created.push(mutation(chromosome, rng));
        }

        for _ in 0..INFUSED_SIZE {
            created.push(shuffled(genes, rng));
        }

        population.extend(created);
        population.sort_by(|a, b| estimation(a).total_cmp(&estimation(b)));

        let best = &population[0];
        if answer.as_ref().is_none_or(|a| estimation(a) > estimation(best)) {
            answer = Some(best.clone());
        }

        population.truncate(POPULATION_SIZE);
    }

    answer.unwrap_or_else(|| genes.to_vec())
}

fn shuffled<R: Rng>(genes: &[Point], rng: &mut R) -> Chromosome {
    let mut genes = genes.to_vec();
    genes.shuffle(rng);
    genes
}

fn crossover(first: &[Point], second: &[Point]) -> Chromosome {
    let crossover_point = second.len() / 2;
    let crossover_part = &first[crossover_point..];
    let mut new_chromosome: Chromosome = second
        .iter()
        .filter(|gene| !crossover_part.contains(gene))
        .copied()
        .collect();
    new_chromosome.extend_from_slice(crossover_part);
    new_chromosome
}

fn mutation<R: Rng>(chromosome: &[Point], rng: &mut R) -> Chromosome {
    let len = chromosome.len();
    let mutation_part_length = rng.random_range(1..len);
    let start = rng.random_range(0..=(len - mutation_part_length));
    let end = start + mutation_part_length;

    let mut rotated = Vec::with_capacity(len);
    rotated.extend_from_slice(&chromosome[start..end]);
    rotated.extend_from_slice(&chromosome[..start]);
    rotated.extend_from_slice(&chromosome[end..]);
    rotated
}

/// total length of the cyclic tour described by `chromosome`.
fn estimation(chromosome: &[Point]) -> f64 {
    (0..chromosome.len())
        .map(|i| {
            let previous = if i == 0 { chromosome.len() - 1 } else { i - 1 };
            chromosome[previous].distance_to(&chromosome[i])
        })
        .sum()
}
