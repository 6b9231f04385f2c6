//! Fractal flower geometry
//!
//! Turns a feature vector and a flower seed into a list of line segments:
//! a short stem followed by a randomized binary (sometimes ternary) branching
//! structure. Branches are expanded from an explicit stack whose draw order
//! matches a depth-first recursion, so equal inputs give bit-identical
//! geometry.

use crate::linguistics::FeatureVector;
use crate::rng::{seeded, GardenRng, RngExt};

const BASE_ITERATIONS: usize = 3;
const MAX_ITERATIONS: usize = 5;
const BASE_ANGLE_DELTA: f64 = 25.0;
const BASE_LENGTH: f64 = 10.0;
const BASE_THICKNESS: f64 = 3.0;
const RARE_THICKNESS_FACTOR: f64 = 1.5;
const LENGTH_DECAY: f64 = 0.7;
const THICKNESS_DECAY: f64 = 0.8;
const MIDDLE_BRANCH_CHANCE: f64 = 0.3;
const MIDDLE_BRANCH_SHORTENING: f64 = 0.8;
const STEM_FRACTION: f64 = 0.2;
const STEM_ANGLE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub thickness: f64,
    pub color_intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    pub iterations: usize,
    pub angle_delta: f64,
    pub initial_length: f64,
    pub thickness: f64,
    pub color_intensity: f64,
}

impl FractalParams {
    pub fn from_features(features: &FeatureVector) -> Self {
        let iterations =
            (BASE_ITERATIONS + features.length / 5).clamp(BASE_ITERATIONS, MAX_ITERATIONS);

        let angle_delta =
            (BASE_ANGLE_DELTA * (1.0 + (features.vowel_ratio - 0.5))).clamp(15.0, 45.0);

        let initial_length =
            (BASE_LENGTH * (1.0 + (features.word_count as f64 - 1.0) * 0.1)).clamp(5.0, 15.0);

        let rare = if features.has_rare_char {
            RARE_THICKNESS_FACTOR
        } else {
            1.0
        };
        let thickness = (BASE_THICKNESS * rare).clamp(1.0, 5.0);

        Self {
            iterations,
            angle_delta,
            initial_length,
            thickness,
            color_intensity: (features.sentiment + 1.0) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fork {
    Left,
    Right,
    Middle,
    Done,
}

/// A drawn branch whose children are still being expanded.
struct Node {
    x: f64,
    y: f64,
    angle: f64,
    length: f64,
    thickness: f64,
    depth: usize,
    next: Fork,
}

pub struct FractalSynthesizer {
    params: FractalParams,
    rng: GardenRng,
}

impl FractalSynthesizer {
    pub fn new(features: &FeatureVector, seed: u32) -> Self {
        Self {
            params: FractalParams::from_features(features),
            rng: seeded(seed as u64),
        }
    }

    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    pub fn synthesize(mut self) -> Vec<Segment> {
        let FractalParams {
            iterations,
            angle_delta,
            initial_length,
            thickness,
            color_intensity,
        } = self.params;

        let mut segments = Vec::new();
        let stem_length = initial_length * STEM_FRACTION;
        let (stem_x, stem_y) = endpoint(0.0, 0.0, STEM_ANGLE, stem_length);
        segments.push(Segment {
            x1: 0.0,
            y1: 0.0,
            x2: stem_x,
            y2: stem_y,
            thickness,
            color_intensity,
        });

        let mut stack = Vec::new();
        grow(
            &mut stack,
            &mut segments,
            color_intensity,
            (stem_x, stem_y),
            STEM_ANGLE,
            initial_length,
            thickness,
            iterations,
        );

        while let Some(node) = stack.last_mut() {
            let (x, y, angle, depth) = (node.x, node.y, node.angle, node.depth - 1);
            let child_length = node.length * LENGTH_DECAY;
            let child_thickness = (node.thickness * THICKNESS_DECAY).max(1.0);

            let fork = node.next;
            let child = match fork {
                Fork::Left => {
                    node.next = Fork::Right;
                    let turn = self.rng.uniform(angle_delta * 0.8, angle_delta * 1.2);
                    Some((angle - turn, child_length))
                }
                Fork::Right => {
                    node.next = Fork::Middle;
                    let turn = self.rng.uniform(angle_delta * 0.8, angle_delta * 1.2);
                    Some((angle + turn, child_length))
                }
                Fork::Middle => {
                    node.next = Fork::Done;
                    if self.rng.chance(MIDDLE_BRANCH_CHANCE) {
                        let turn = self.rng.uniform(-angle_delta * 0.3, angle_delta * 0.3);
                        Some((angle + turn, child_length * MIDDLE_BRANCH_SHORTENING))
                    } else {
                        None
                    }
                }
                Fork::Done => {
                    stack.pop();
                    None
                }
            };

            if let Some((child_angle, length)) = child {
                grow(
                    &mut stack,
                    &mut segments,
                    color_intensity,
                    (x, y),
                    child_angle,
                    length,
                    child_thickness,
                    depth,
                );
            }
        }

        segments
    }
}

/// Synthesize the geometry of one flower.
pub fn synthesize(features: &FeatureVector, seed: u32) -> Vec<Segment> {
    FractalSynthesizer::new(features, seed).synthesize()
}

#[allow(clippy::too_many_arguments)]
fn grow(
    stack: &mut Vec<Node>,
    segments: &mut Vec<Segment>,
    color_intensity: f64,
    (x, y): (f64, f64),
    angle: f64,
    length: f64,
    thickness: f64,
    depth: usize,
) {
    if depth == 0 {
        return;
    }
    let (nx, ny) = endpoint(x, y, angle, length);
    segments.push(Segment {
        x1: x,
        y1: y,
        x2: nx,
        y2: ny,
        thickness,
        color_intensity,
    });
    stack.push(Node {
        x: nx,
        y: ny,
        angle,
        length,
        thickness,
        depth,
        next: Fork::Left,
    });
}

/// Screen convention: angles turn counter-clockwise, `y` grows downward.
fn endpoint(x: f64, y: f64, angle_deg: f64, length: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (x + length * rad.cos(), y - length * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistics::analyze;

    fn features(
        length: usize,
        vowel_ratio: f64,
        rare: bool,
        words: usize,
        sentiment: f64,
    ) -> FeatureVector {
        FeatureVector {
            sentiment,
            length,
            vowel_ratio,
            has_rare_char: rare,
            word_count: words,
            cleaned_words: Vec::new(),
        }
    }

    #[test]
    fn test_params_are_clamped() {
        let long = FractalParams::from_features(&features(100, 0.5, false, 1, 0.0));
        assert_eq!(long.iterations, 5);

        let short = FractalParams::from_features(&features(1, 0.1, false, 1, 0.0));
        assert_eq!(short.iterations, 3);
        assert!((short.angle_delta - 15.0).abs() < 1e-9);

        let wordy = FractalParams::from_features(&features(10, 1.0, true, 20, 1.0));
        assert!((wordy.angle_delta - 37.5).abs() < 1e-9);
        assert!((wordy.initial_length - 15.0).abs() < 1e-9);
        assert!((wordy.thickness - 4.5).abs() < 1e-9);
        assert!((wordy.color_intensity - 1.0).abs() < 1e-9);

        let empty = FractalParams::from_features(&FeatureVector::neutral());
        assert!((empty.initial_length - 9.0).abs() < 1e-9);
        assert!((empty.color_intensity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stem_points_up() {
        let geometry = synthesize(&analyze("green"), 1);
        let stem = geometry[0];
        assert_eq!((stem.x1, stem.y1), (0.0, 0.0));
        assert!(stem.x2.abs() < 1e-9);
        assert!((stem.y2 + 2.0).abs() < 1e-9);
        assert!((stem.thickness - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_geometry() {
        let f = analyze("furiously");
        assert_eq!(synthesize(&f, 12345), synthesize(&f, 12345));
    }

    #[test]
    fn test_different_seed_different_geometry() {
        let f = analyze("furiously");
        assert_ne!(synthesize(&f, 1), synthesize(&f, 2));
    }

    #[test]
    fn test_segment_count_within_branching_bounds() {
        // stem + at least a full binary tree, at most a full ternary tree
        for seed in 0..20 {
            let geometry = synthesize(&analyze("ideas"), seed);
            let binary: usize = (0..4).map(|d| 1 << d).sum();
            let ternary: usize = (0..4).map(|d| 3usize.pow(d)).sum();
            assert!(geometry.len() > binary, "seed {seed}: {}", geometry.len());
            assert!(geometry.len() <= ternary + 1, "seed {seed}: {}", geometry.len());
        }
    }

    #[test]
    fn test_branches_connect_and_thin_out() {
        let geometry = synthesize(&analyze("sleep"), 99);
        let first_branch = geometry[1];
        assert!((first_branch.x1 - geometry[0].x2).abs() < 1e-9);
        assert!((first_branch.y1 - geometry[0].y2).abs() < 1e-9);
        for segment in &geometry {
            assert!(segment.thickness >= 1.0);
            assert!(segment.thickness <= 3.0 + 1e-9);
            assert!((segment.color_intensity - 0.5).abs() < 1e-9);
        }
    }
}
