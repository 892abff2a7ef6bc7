// Persistence
pub const STORAGE_KEY: &str = "pokemonPlayState";
pub const DATA_DIR_NAME: &str = ".pokeplay";

// Initial player record
pub const INITIAL_COINS: u64 = 500;
pub const INITIAL_LEVEL: u32 = 1;
pub const INITIAL_HIGH_SCORE: u64 = 0;

// Item drops
pub const ITEM_DROP_CHANCE: f64 = 0.10;

// Currency mini-games compare sums of fractional coins with this tolerance
pub const CURRENCY_TOLERANCE: f64 = 0.001;

// Session timing
pub const VICTORY_DISPLAY_DELAY_MS: u64 = 3000;
pub const FAILURE_DISPLAY_DELAY_MS: u64 = 3000;

// Shop prices (coins)
pub const POTION_PRICE: u64 = 50;
pub const POKEBALL_PRICE: u64 = 100;

// Mini-game rewards (coins)
pub const SNORLAX_REWARD: u64 = 10;
pub const DIGLETT_REWARD: u64 = 20;
pub const MEOWTH_REWARD: u64 = 20;
pub const PIKACHU_REWARD: u64 = 30;
pub const SILHOUETTE_REWARD: u64 = 15;
pub const CHANSEY_BASE_REWARD: u64 = 10;
pub const CHANSEY_REWARD_PER_LEVEL: u64 = 2;

// Snorlax wake meter (0.0 = asleep, 1.0 = awake)
pub const SNORLAX_MIN_TARGET: u32 = 5;
pub const SNORLAX_BASE_WAKE_RATE: f64 = 0.05;
pub const SNORLAX_WAKE_RATE_PER_LEVEL: f64 = 0.1;
pub const SNORLAX_TIMER_MIN_LEVEL: u32 = 4;
pub const SNORLAX_WRONG_ANSWER_PENALTY: f64 = 0.3;
pub const POTION_WAKE_REDUCTION: f64 = 0.5;

// Power-ups
pub const PARALYZE_DURATION_MS: u64 = 5000;

// Diglett counter
pub const DIGLETT_BASE_SPAWN_INTERVAL_MS: u64 = 1500;
pub const DIGLETT_SPAWN_INTERVAL_STEP_MS: u64 = 50;
pub const DIGLETT_MIN_SPAWN_INTERVAL_MS: u64 = 500;
pub const DIGLETT_VISIBLE_MS: u64 = 3000;

// Pikachu count
pub const PIKACHU_BASE_SPAWN_INTERVAL_MS: u64 = 1000;
pub const PIKACHU_SPAWN_INTERVAL_STEP_MS: u64 = 20;
pub const PIKACHU_MIN_SPAWN_INTERVAL_MS: u64 = 500;
pub const PIKACHU_OPTIONS_DELAY_MS: u64 = 1000;
pub const PIKACHU_OPTION_SPREAD: u32 = 2;

// Answer choices shown by multiple-choice games
pub const ANSWER_OPTION_COUNT: usize = 3;

// Silhouette scanner
pub const SILHOUETTE_TARGETS: usize = 3;
pub const SILHOUETTE_DISTRACTORS: usize = 3;

// Meowth chests: the two wrong chests are offset from the target
pub const MEOWTH_SHORT_OFFSET: f64 = 0.20;
pub const MEOWTH_OVER_OFFSET: f64 = 0.50;
pub const MEOWTH_MIN_WRONG_AMOUNT: f64 = 0.05;
