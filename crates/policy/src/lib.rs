//! Move-selection policies
//!
//! The players. Every policy speculates the same way: clone the state, try
//! a move on the copy, rank what comes back. None of them reach into the
//! mechanics beyond the public engine API, and all of them are seeded
//! explicitly so a run can be replayed bit for bit.
//!
//! | Policy | Selection |
//! |--------|-----------|
//! | [`RandomPolicy`] | uniform over legal moves |
//! | [`GreedyPolicy`] | immediate points plus color connectivity |
//! | [`ComboPolicy`] | latent multi-pass chains found by probe drops |

mod base;
mod combo;
mod greedy;
mod random;

pub use base::Policy;
pub use combo::ComboPolicy;
pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;
