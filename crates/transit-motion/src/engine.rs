//! Token motion engine.
//!
//! All tokens share one leg clock. Each tick adds `elapsed / traversal_duration`
//! to it; while it is below 1 every token sits that fraction of the way along
//! its current leg. When it reaches 1 every token arrives at the same moment,
//! picks its next leg at the arrival station and the clock restarts at 0.
//! A tick completes at most one leg, however large `elapsed` is.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use transit_graph::{Color, EdgeId, GraphStore, StationId};

use crate::branch::{select_next, Branch, BranchPolicy, UniformBranch};
use crate::error::{MotionError, Result};
use crate::token::{Token, TokenId};

/// Configuration for the motion engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Seconds for every token to complete one leg.
    pub traversal_duration: f32,
    /// Seed for junction choices
    pub seed: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            traversal_duration: 1.0,
            seed: 42,
        }
    }
}

/// What happened during a successful tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tokens that completed a leg this tick.
    pub arrivals: usize,
    /// Of those, tokens that turned around at a dead end.
    pub reversals: usize,
}

/// Owns every token and moves them over a borrowed graph.
pub struct MotionEngine<P: BranchPolicy = UniformBranch> {
    config: MotionConfig,
    policy: P,
    rng: ChaCha8Rng,
    tokens: Vec<Token>,
    clock: f32,
    next_token_id: u64,
}

impl MotionEngine {
    /// Create an engine with uniform junction choices.
    pub fn new(config: MotionConfig) -> Self {
        Self::with_policy(config, UniformBranch)
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl<P: BranchPolicy> MotionEngine<P> {
    /// Create an engine with a custom junction policy.
    pub fn with_policy(config: MotionConfig, policy: P) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            policy,
            tokens: Vec::new(),
            clock: 0.0,
            next_token_id: 0,
        }
    }

    /// Add a token at `departing`, about to travel along `edge`.
    pub fn spawn(
        &mut self,
        graph: &GraphStore,
        edge: EdgeId,
        departing: StationId,
        color: Color,
    ) -> Result<TokenId> {
        let id = TokenId(self.next_token_id);
        let token = Token::new(id, graph, edge, departing, color)?;
        self.next_token_id += 1;
        self.tokens.push(token);
        debug!(%id, %edge, %departing, "token spawned");
        Ok(id)
    }

    /// Add `count` tokens on the same edge, all departing `departing`.
    pub fn spawn_batch(
        &mut self,
        graph: &GraphStore,
        edge: EdgeId,
        departing: StationId,
        color: Color,
        count: usize,
    ) -> Result<Vec<TokenId>> {
        (0..count)
            .map(|_| self.spawn(graph, edge, departing, color))
            .collect()
    }

    /// Advance every token by `elapsed` seconds.
    ///
    /// A token arriving at an isolated station is held there; the remaining
    /// tokens are still advanced and the first newly held token is reported
    /// as [`MotionError::Stranded`]. Held tokens stay put on later ticks and
    /// are not reported again.
    ///
    /// Any other error leaves the engine exactly as it was before the call.
    pub fn tick(&mut self, graph: &GraphStore, elapsed: f32) -> Result<TickReport> {
        let mut clock = self.clock;
        if elapsed.is_finite() && elapsed > 0.0 {
            clock += if self.config.traversal_duration > 0.0 {
                elapsed / self.config.traversal_duration
            } else {
                1.0
            };
        }
        let completed = clock >= 1.0;

        // Work on copies; nothing is committed unless every token succeeds.
        let mut tokens = self.tokens.clone();
        let mut rng = self.rng.clone();
        let mut report = TickReport::default();
        let mut stranded = None;

        for token in &mut tokens {
            if !completed {
                if !token.is_stranded() {
                    token.place(graph, clock)?;
                }
                continue;
            }

            let arrived = token.traversal;
            match select_next(graph, &arrived, &self.policy, &mut rng)? {
                Branch::Forward(next) => token.traversal = next,
                Branch::Reversed(next) => {
                    token.traversal = next;
                    report.reversals += 1;
                }
                Branch::Stranded => {
                    if !token.is_stranded() {
                        error!(token = %token.id, station = %arrived.to, "token stranded at isolated station");
                        stranded.get_or_insert(MotionError::Stranded {
                            token: token.id,
                            station: arrived.to,
                        });
                    }
                    token.hold(graph, arrived.to)?;
                    continue;
                }
            }
            if token.stranded.take().is_some() {
                debug!(token = %token.id, station = %arrived.to, "stranded token resumed");
            }
            report.arrivals += 1;
            token.place(graph, 0.0)?;
        }

        self.tokens = tokens;
        self.rng = rng;
        self.clock = if completed { 0.0 } else { clock };

        match stranded {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Shared leg clock, `0.0..1.0` between ticks.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }
}
