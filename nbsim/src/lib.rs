pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, BodyRecord, Cluster, FlatCluster, NVec3, Particles};
pub use simulation::forces::{distance_cube, CoincidentPair, CubeLaw, Gravity, PowerOneAndHalf, SqrtMultiply};
pub use simulation::integrator::{advance, euler_step, leapfrog_step, prime, Integrate};
pub use simulation::driver::{Progress, RunSummary, Simulation};
pub use simulation::engine::Engine;
pub use simulation::params::Parameters;
pub use simulation::scenario::{circular_binary, circular_binary_period, lattice_cluster, Scenario};

pub use configuration::config::{CubeFormConfig, EngineConfig, IntegratorConfig, LayoutConfig, ParametersConfig, RunConfig};
pub use configuration::initial_conditions::{load_bodies, parse_bodies};

pub use error::{SimError, SimResult};

pub use benchmark::benchmark::{bench_variants, print_csv, BenchRow};
