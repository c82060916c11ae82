//! Randomized workout generator.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::error::WorkoutError;
use crate::types::{
    ConfigTable, DifficultyConfig, Exercise, ExerciseLibrary, LibraryEntry, SequenceItem,
    WorkoutPlan, CUSTOM_DIFFICULTY, CUSTOM_DIFFICULTY_LABEL,
};

// ============================================================================
// ExercisePool
// ============================================================================

/// Shuffle-and-drain pool over the library entries.
///
/// Every pass visits each entry once in random order; a new pass is only
/// shuffled once the current one is empty.
struct ExercisePool<'a> {
    entries: Vec<&'a LibraryEntry>,
    /// Indices into `entries` not yet drawn in this pass, drawn from the back
    pass: Vec<usize>,
}

impl<'a> ExercisePool<'a> {
    fn new(library: &'a ExerciseLibrary) -> Self {
        Self {
            entries: library.iter().map(|(_, entry)| entry).collect(),
            pass: Vec::new(),
        }
    }

    /// Draws the next entry of the current pass.
    fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<&'a LibraryEntry> {
        if self.pass.is_empty() {
            self.start_pass(rng);
        }
        self.pass.pop().map(|index| self.entries[index])
    }

    /// Draws an individual exercise, preferring one unused in this pass.
    ///
    /// Returns `None` if the library has no individual exercises.
    fn draw_single<R: Rng>(&mut self, rng: &mut R) -> Option<&'a Exercise> {
        let unused = self
            .pass
            .iter()
            .rposition(|&index| self.entries[index].is_single());

        if let Some(position) = unused {
            let index = self.pass.remove(position);
            return single(self.entries[index]);
        }

        let singles: Vec<&'a Exercise> = self.entries.iter().filter_map(|&e| single(e)).collect();
        if singles.is_empty() {
            return None;
        }
        Some(singles[rng.random_range(0..singles.len())])
    }

    fn start_pass<R: Rng>(&mut self, rng: &mut R) {
        self.pass = (0..self.entries.len()).collect();
        self.pass.shuffle(rng);
        debug!(entries = self.entries.len(), "Starting new exercise pass");
    }
}

fn single(entry: &LibraryEntry) -> Option<&Exercise> {
    match entry {
        LibraryEntry::Single(exercise) => Some(exercise),
        LibraryEntry::Group(_) => None,
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Looks up the configuration for a difficulty key.
///
/// Returns the configuration together with its display label.
///
/// # Errors
///
/// Returns `WorkoutError::UnknownDifficulty` if the key is not configured, or
/// if `custom` is requested without a custom configuration.
pub fn resolve_config<'a>(
    difficulty: &str,
    configs: &'a ConfigTable,
    custom: Option<&'a DifficultyConfig>,
) -> Result<(&'a DifficultyConfig, String), WorkoutError> {
    let unknown = || WorkoutError::UnknownDifficulty(difficulty.to_string());

    if difficulty == CUSTOM_DIFFICULTY {
        let config = custom.ok_or_else(unknown)?;
        let label = config
            .name
            .clone()
            .unwrap_or_else(|| CUSTOM_DIFFICULTY_LABEL.to_string());
        return Ok((config, label));
    }

    let config = configs.get(difficulty).ok_or_else(unknown)?;
    let label = config.name.clone().unwrap_or_else(|| difficulty.to_string());
    Ok((config, label))
}

/// Computes where long pauses go, counted in exercises before the pause.
///
/// Positions that collapse onto the start of the workout (when the interval
/// rounds down to zero) are skipped, so fewer pauses than requested may be
/// returned.
pub fn pause_positions(total_exercises: usize, pause_count: usize) -> Vec<usize> {
    if pause_count == 0 {
        return Vec::new();
    }

    let interval = total_exercises / pause_count.saturating_add(1);
    if interval == 0 {
        return Vec::new();
    }

    // Positions grow with k, so the walk stops at the end of the workout
    (1..=pause_count)
        .map(|k| interval * k)
        .take_while(|&position| position < total_exercises)
        .collect()
}

/// Generates a workout sequence for the given difficulty.
///
/// # Errors
///
/// Returns `WorkoutError::UnknownDifficulty` for an unconfigured difficulty
/// and `WorkoutError::NoExercises` for an empty library.
pub fn generate<R: Rng>(
    difficulty: &str,
    library: &ExerciseLibrary,
    configs: &ConfigTable,
    custom: Option<&DifficultyConfig>,
    rng: &mut R,
) -> Result<Vec<SequenceItem>, WorkoutError> {
    let (config, _) = resolve_config(difficulty, configs, custom)?;

    if library.is_empty() {
        return Err(WorkoutError::NoExercises);
    }

    let total = config.total_exercises as usize;
    let positions = pause_positions(total, config.pause_count as usize);
    let mut pool = ExercisePool::new(library);
    let mut sequence = Vec::with_capacity(total + positions.len());

    while sequence.len() < total {
        let entry = pool.draw(rng).ok_or(WorkoutError::NoExercises)?;

        match entry {
            LibraryEntry::Single(exercise) => {
                sequence.push(SequenceItem::exercise(exercise.clone()));
            }
            LibraryEntry::Group(group) if total - sequence.len() >= 2 => {
                sequence.push(SequenceItem::exercise(group.left.clone()));
                sequence.push(SequenceItem::exercise(group.right.clone()));
            }
            LibraryEntry::Group(group) => {
                // One slot left: a pair would overflow it
                let substitute = pool.draw_single(rng).unwrap_or(&group.left);
                debug!(
                    group = %group.left.id,
                    substitute = %substitute.id,
                    "Replacing group on last slot"
                );
                sequence.push(SequenceItem::exercise(substitute.clone()));
            }
        }
    }

    for &position in positions.iter().rev() {
        sequence.insert(position, SequenceItem::pause(config.pause_duration));
    }

    debug!(
        difficulty,
        exercises = total,
        pauses = positions.len(),
        "Generated workout"
    );

    Ok(sequence)
}

/// Generates a workout sequence using the thread-local random generator.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_workout(
    difficulty: &str,
    library: &ExerciseLibrary,
    configs: &ConfigTable,
    custom: Option<&DifficultyConfig>,
) -> Result<Vec<SequenceItem>, WorkoutError> {
    generate(difficulty, library, configs, custom, &mut rand::rng())
}

/// Generates a sequence and labels it with the difficulty's display name.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_plan<R: Rng>(
    difficulty: &str,
    library: &ExerciseLibrary,
    configs: &ConfigTable,
    custom: Option<&DifficultyConfig>,
    rng: &mut R,
) -> Result<WorkoutPlan, WorkoutError> {
    let sequence = generate(difficulty, library, configs, custom, rng)?;
    let (_, label) = resolve_config(difficulty, configs, custom)?;
    Ok(WorkoutPlan::new(label, sequence))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClockDuration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn mock_library() -> ExerciseLibrary {
        ExerciseLibrary::new()
            .with_exercise(Exercise::new("sidestep-squats", "Sidestep Squats", "Seitlich"))
            .with_exercise(Exercise::new("burpees", "Burpees", "Springen"))
            .with_exercise(Exercise::new("one-arm-kb-swing", "One-arm KB Swing", "Schwingen"))
            .with_exercise(Exercise::new("mountain-climbers", "Mountain Climbers", "Knie"))
            .with_group(
                "kb-lateral-swing-snatch-group",
                Exercise::new("kb-lateral-swing-snatch-left", "Snatch links", ""),
                Exercise::new("kb-lateral-swing-snatch-right", "Snatch rechts", ""),
            )
            .with_group(
                "kb-lateral-swing-windmill",
                Exercise::new("kb-lateral-swing-windmill-left", "Windmill links", ""),
                Exercise::new("kb-lateral-swing-windmill-right", "Windmill rechts", ""),
            )
    }

    fn singles_only() -> ExerciseLibrary {
        mock_library()
            .iter()
            .filter(|(_, entry)| entry.is_single())
            .map(|(id, entry)| (id.to_string(), entry.clone()))
            .collect()
    }

    fn groups_only() -> ExerciseLibrary {
        mock_library()
            .iter()
            .filter(|(_, entry)| entry.is_group())
            .map(|(id, entry)| (id.to_string(), entry.clone()))
            .collect()
    }

    fn preset(name: &str, total: u32, pauses: u32, duration: &str) -> DifficultyConfig {
        DifficultyConfig::new(total, pauses, duration.parse().unwrap()).with_name(name)
    }

    fn mock_configs() -> ConfigTable {
        let mut configs = ConfigTable::new();
        configs.insert("leicht".into(), preset("Leicht", 6, 1, "01:00"));
        configs.insert("moderat".into(), preset("Moderat", 8, 2, "02:00"));
        configs.insert("anstrengend".into(), preset("Anstrengend", 10, 1, "01:00"));
        configs.insert("brutal".into(), preset("Brutal", 12, 2, "02:00"));
        configs
    }

    fn custom_config() -> DifficultyConfig {
        DifficultyConfig::new(8, 1, "01:30".parse().unwrap())
    }

    fn exercise_ids(sequence: &[SequenceItem]) -> Vec<String> {
        sequence
            .iter()
            .filter_map(|item| item.as_exercise())
            .map(|exercise| exercise.id.clone())
            .collect()
    }

    fn pause_count(sequence: &[SequenceItem]) -> usize {
        sequence.iter().filter(|item| item.is_pause()).count()
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    // ------------------------------------------------------------------------
    // Input Validation Tests
    // ------------------------------------------------------------------------

    mod validation_tests {
        use super::*;

        #[test]
        fn test_unknown_difficulty() {
            let result = generate("unknown", &mock_library(), &mock_configs(), None, &mut seeded(1));
            assert_eq!(
                result.unwrap_err(),
                WorkoutError::UnknownDifficulty("unknown".to_string())
            );
        }

        #[test]
        fn test_empty_library() {
            let result = generate(
                "leicht",
                &ExerciseLibrary::new(),
                &mock_configs(),
                None,
                &mut seeded(1),
            );
            assert_eq!(result.unwrap_err(), WorkoutError::NoExercises);
        }

        #[test]
        fn test_difficulty_checked_before_library() {
            let result = generate(
                "unknown",
                &ExerciseLibrary::new(),
                &mock_configs(),
                None,
                &mut seeded(1),
            );
            assert!(matches!(result, Err(WorkoutError::UnknownDifficulty(_))));
        }

        #[test]
        fn test_custom_config() {
            let custom = custom_config();
            let result = generate(
                CUSTOM_DIFFICULTY,
                &mock_library(),
                &mock_configs(),
                Some(&custom),
                &mut seeded(1),
            )
            .unwrap();

            assert_eq!(exercise_ids(&result).len(), 8);
            for item in result.iter().filter(|item| item.is_pause()) {
                assert_eq!(item, &SequenceItem::pause(ClockDuration::from_secs(90)));
            }
        }

        #[test]
        fn test_custom_without_config() {
            let result = generate(
                CUSTOM_DIFFICULTY,
                &mock_library(),
                &mock_configs(),
                None,
                &mut seeded(1),
            );
            assert_eq!(
                result.unwrap_err(),
                WorkoutError::UnknownDifficulty("custom".to_string())
            );
        }
    }

    // ------------------------------------------------------------------------
    // resolve_config Tests
    // ------------------------------------------------------------------------

    mod resolve_config_tests {
        use super::*;

        #[test]
        fn test_preset_label_from_name() {
            let configs = mock_configs();
            let (config, label) = resolve_config("moderat", &configs, None).unwrap();
            assert_eq!(config.total_exercises, 8);
            assert_eq!(label, "Moderat");
        }

        #[test]
        fn test_preset_without_name_uses_key() {
            let mut configs = ConfigTable::new();
            configs.insert("quick".into(), DifficultyConfig::new(3, 0, ClockDuration::from_secs(0)));
            let (_, label) = resolve_config("quick", &configs, None).unwrap();
            assert_eq!(label, "quick");
        }

        #[test]
        fn test_custom_label() {
            let configs = mock_configs();
            let custom = custom_config();
            let (_, label) = resolve_config(CUSTOM_DIFFICULTY, &configs, Some(&custom)).unwrap();
            assert_eq!(label, CUSTOM_DIFFICULTY_LABEL);

            let named = custom_config().with_name("Mein Workout");
            let (_, label) = resolve_config(CUSTOM_DIFFICULTY, &configs, Some(&named)).unwrap();
            assert_eq!(label, "Mein Workout");
        }

        #[test]
        fn test_custom_ignores_table_entry() {
            let mut configs = mock_configs();
            configs.insert(CUSTOM_DIFFICULTY.into(), custom_config());
            assert!(resolve_config(CUSTOM_DIFFICULTY, &configs, None).is_err());
        }

        #[test]
        fn test_generate_plan_carries_label() {
            let plan = generate_plan("brutal", &mock_library(), &mock_configs(), None, &mut seeded(3))
                .unwrap();
            assert_eq!(plan.difficulty_label, "Brutal");
            assert_eq!(plan.total_exercises(), 12);
        }

        #[test]
        fn test_generate_plan_unknown_difficulty() {
            let err = generate_plan("extrem", &mock_library(), &mock_configs(), None, &mut seeded(3))
                .unwrap_err();
            assert_eq!(err, WorkoutError::UnknownDifficulty("extrem".to_string()));
        }
    }

    // ------------------------------------------------------------------------
    // Pause Position Tests
    // ------------------------------------------------------------------------

    mod pause_position_tests {
        use super::*;

        #[test]
        fn test_presets() {
            assert_eq!(pause_positions(6, 1), vec![3]);
            assert_eq!(pause_positions(8, 2), vec![2, 4]);
            assert_eq!(pause_positions(10, 1), vec![5]);
            assert_eq!(pause_positions(12, 2), vec![4, 8]);
        }

        #[test]
        fn test_no_pauses() {
            assert!(pause_positions(6, 0).is_empty());
        }

        #[test]
        fn test_interval_zero_is_skipped() {
            assert!(pause_positions(2, 3).is_empty());
            assert!(pause_positions(1, 1).is_empty());
        }

        #[test]
        fn test_huge_pause_count() {
            assert!(pause_positions(6, u32::MAX as usize).is_empty());
            assert_eq!(pause_positions(6, 2), vec![2, 4]);
        }

        #[test]
        fn test_more_pauses_than_gaps() {
            assert_eq!(pause_positions(3, 2), vec![1, 2]);
            assert_eq!(pause_positions(5, 4), vec![1, 2, 3, 4]);
        }
    }

    // ------------------------------------------------------------------------
    // Sequence Generation Tests
    // ------------------------------------------------------------------------

    mod sequence_tests {
        use super::*;

        #[test]
        fn test_exact_exercise_count_for_all_presets() {
            let library = mock_library();
            let configs = mock_configs();

            for (key, config) in &configs {
                for seed in 0..50 {
                    let sequence = generate(key, &library, &configs, None, &mut seeded(seed)).unwrap();
                    assert_eq!(
                        exercise_ids(&sequence).len(),
                        config.total_exercises as usize,
                        "difficulty {} seed {}",
                        key,
                        seed
                    );
                }
            }
        }

        #[test]
        fn test_pause_structure_invariants() {
            let library = mock_library();
            let configs = mock_configs();

            for (key, config) in &configs {
                for seed in 0..50 {
                    let sequence = generate(key, &library, &configs, None, &mut seeded(seed)).unwrap();

                    assert!(pause_count(&sequence) <= config.pause_count as usize);
                    assert!(sequence.first().unwrap().is_exercise());
                    assert!(sequence.last().unwrap().is_exercise());
                    for pair in sequence.windows(2) {
                        assert!(
                            !(pair[0].is_pause() && pair[1].is_pause()),
                            "adjacent pauses for {} seed {}",
                            key,
                            seed
                        );
                    }
                }
            }
        }

        #[test]
        fn test_huge_pause_count_from_custom_config() {
            let config = DifficultyConfig::new(6, u32::MAX, "01:00".parse().unwrap());

            let sequence = generate(
                CUSTOM_DIFFICULTY,
                &singles_only(),
                &ConfigTable::new(),
                Some(&config),
                &mut seeded(1),
            )
            .unwrap();

            assert_eq!(exercise_ids(&sequence).len(), 6);
            assert_eq!(pause_count(&sequence), 0);
            assert!(sequence.first().unwrap().is_exercise());
            assert!(sequence.last().unwrap().is_exercise());
        }

        #[test]
        fn test_leicht_example() {
            let library = singles_only()
                .iter()
                .map(|(id, entry)| (id.to_string(), entry.clone()))
                .chain([
                    (
                        "plank".to_string(),
                        LibraryEntry::Single(Exercise::new("plank", "Plank", "")),
                    ),
                    (
                        "push-ups".to_string(),
                        LibraryEntry::Single(Exercise::new("push-ups", "Liegestütze", "")),
                    ),
                ])
                .collect::<ExerciseLibrary>();
            assert_eq!(library.len(), 6);

            let sequence = generate("leicht", &library, &mock_configs(), None, &mut seeded(7)).unwrap();

            assert_eq!(exercise_ids(&sequence).len(), 6);
            let pauses: Vec<usize> = sequence
                .iter()
                .enumerate()
                .filter(|(_, item)| item.is_pause())
                .map(|(index, _)| index)
                .collect();
            assert!(pauses.len() <= 1);
            for index in pauses {
                assert!(index > 0 && index < sequence.len() - 1);
                assert_eq!(
                    sequence[index],
                    SequenceItem::pause("01:00".parse().unwrap())
                );
            }
        }

        #[test]
        fn test_no_pauses_when_pause_count_zero() {
            let mut configs = mock_configs();
            configs.get_mut("leicht").unwrap().pause_count = 0;

            let sequence = generate("leicht", &mock_library(), &configs, None, &mut seeded(3)).unwrap();
            assert_eq!(pause_count(&sequence), 0);
            assert_eq!(sequence.len(), 6);
        }

        #[test]
        fn test_pause_duration_matches_config() {
            let sequence = generate("moderat", &mock_library(), &mock_configs(), None, &mut seeded(5)).unwrap();
            for item in sequence.iter().filter(|item| item.is_pause()) {
                assert_eq!(item, &SequenceItem::pause("02:00".parse().unwrap()));
            }
        }

        #[test]
        fn test_pauses_distributed_evenly() {
            let sequence = generate("moderat", &mock_library(), &mock_configs(), None, &mut seeded(11)).unwrap();

            let mut exercises_before = 0;
            let mut positions = Vec::new();
            for item in &sequence {
                if item.is_pause() {
                    positions.push(exercises_before);
                } else {
                    exercises_before += 1;
                }
            }
            assert_eq!(positions, vec![2, 4]);
        }

        #[test]
        fn test_interval_zero_yields_fewer_pauses() {
            let custom = DifficultyConfig::new(2, 3, "00:30".parse().unwrap());
            let sequence = generate(
                CUSTOM_DIFFICULTY,
                &mock_library(),
                &mock_configs(),
                Some(&custom),
                &mut seeded(1),
            )
            .unwrap();

            assert_eq!(exercise_ids(&sequence).len(), 2);
            assert_eq!(pause_count(&sequence), 0);
        }

        #[test]
        fn test_single_exercise_workout() {
            let custom = DifficultyConfig::new(1, 1, "00:30".parse().unwrap());
            let sequence = generate(
                CUSTOM_DIFFICULTY,
                &mock_library(),
                &mock_configs(),
                Some(&custom),
                &mut seeded(1),
            )
            .unwrap();

            assert_eq!(sequence.len(), 1);
            assert!(sequence[0].is_exercise());
        }

        #[test]
        fn test_same_seed_same_sequence() {
            let library = mock_library();
            let configs = mock_configs();
            let first = generate("brutal", &library, &configs, None, &mut seeded(42)).unwrap();
            let second = generate("brutal", &library, &configs, None, &mut seeded(42)).unwrap();
            assert_eq!(first, second);
        }

        #[test]
        fn test_generate_workout_uses_thread_rng() {
            let sequence = generate_workout("leicht", &mock_library(), &mock_configs(), None).unwrap();
            assert_eq!(exercise_ids(&sequence).len(), 6);
        }
    }

    // ------------------------------------------------------------------------
    // Exercise Selection Tests
    // ------------------------------------------------------------------------

    mod selection_tests {
        use super::*;

        #[test]
        fn test_exercise_ids_resolve() {
            let sequence = generate("leicht", &mock_library(), &mock_configs(), None, &mut seeded(9)).unwrap();
            for item in &sequence {
                if let SequenceItem::Exercise {
                    exercise_id,
                    exercise,
                } = item
                {
                    assert!(!exercise_id.is_empty());
                    assert_eq!(exercise_id, &exercise.id);
                }
            }
        }

        #[test]
        fn test_no_repeats_within_a_pass() {
            let library = singles_only();
            let mut configs = mock_configs();
            configs.get_mut("moderat").unwrap().pause_count = 0;

            for seed in 0..50 {
                let ids = exercise_ids(
                    &generate("moderat", &library, &configs, None, &mut seeded(seed)).unwrap(),
                );
                assert_eq!(ids.len(), 8);

                let first_pass: HashSet<_> = ids[..4].iter().collect();
                let second_pass: HashSet<_> = ids[4..].iter().collect();
                assert_eq!(first_pass.len(), 4, "seed {}", seed);
                assert_eq!(second_pass.len(), 4, "seed {}", seed);
            }
        }

        #[test]
        fn test_individual_only_library() {
            let library = singles_only();
            let sequence = generate("leicht", &library, &mock_configs(), None, &mut seeded(2)).unwrap();
            for id in exercise_ids(&sequence) {
                assert!(library.get(&id).is_some(), "{} should be a library key", id);
            }
        }

        #[test]
        fn test_group_members_are_consecutive() {
            let library = mock_library();
            let configs = mock_configs();

            for (key, _) in &configs {
                for seed in 0..100 {
                    let ids = exercise_ids(
                        &generate(key, &library, &configs, None, &mut seeded(seed)).unwrap(),
                    );
                    for (index, id) in ids.iter().enumerate() {
                        if let Some(prefix) = id.strip_suffix("-left") {
                            assert_eq!(
                                ids.get(index + 1).map(String::as_str),
                                Some(format!("{}-right", prefix).as_str()),
                                "{} seed {}: {:?}",
                                key,
                                seed,
                                ids
                            );
                        }
                        if let Some(prefix) = id.strip_suffix("-right") {
                            assert_eq!(
                                index.checked_sub(1).map(|i| ids[i].as_str()),
                                Some(format!("{}-left", prefix).as_str())
                            );
                        }
                    }
                }
            }
        }

        #[test]
        fn test_long_pause_may_split_a_group() {
            // Pairs fill slots 0-1, 2-3, 4-5 and the pause goes after slot 2
            let config = DifficultyConfig::new(6, 1, "01:00".parse().unwrap());

            let sequence = generate(
                CUSTOM_DIFFICULTY,
                &groups_only(),
                &ConfigTable::new(),
                Some(&config),
                &mut seeded(3),
            )
            .unwrap();

            assert_eq!(sequence.len(), 7);
            assert!(sequence[3].is_pause());

            let before = sequence[2].as_exercise().unwrap();
            let after = sequence[4].as_exercise().unwrap();
            let prefix = before.id.strip_suffix("-left").unwrap();
            assert_eq!(after.id, format!("{}-right", prefix));

            // Apart from that pause, every left member is followed by its right one
            for (index, item) in sequence.iter().enumerate() {
                let Some(prefix) = item.as_exercise().and_then(|e| e.id.strip_suffix("-left"))
                else {
                    continue;
                };
                let next = match &sequence[index + 1] {
                    SequenceItem::Pause { .. } => &sequence[index + 2],
                    item => item,
                };
                assert_eq!(
                    next.as_exercise().map(|e| e.id.clone()),
                    Some(format!("{}-right", prefix))
                );
            }
        }

        #[test]
        fn test_last_slot_group_replaced_by_single() {
            let library = mock_library();
            let custom = DifficultyConfig::new(7, 0, "00:30".parse().unwrap());

            for seed in 0..100 {
                let ids = exercise_ids(
                    &generate(
                        CUSTOM_DIFFICULTY,
                        &library,
                        &mock_configs(),
                        Some(&custom),
                        &mut seeded(seed),
                    )
                    .unwrap(),
                );
                assert_eq!(ids.len(), 7);

                let last = ids.last().unwrap();
                if !last.ends_with("-right") {
                    assert!(
                        library.get(last).map(LibraryEntry::is_single).unwrap_or(false),
                        "seed {}: last exercise {} should be individual",
                        seed,
                        last
                    );
                }
            }
        }

        #[test]
        fn test_groups_only_library_falls_back_to_left_member() {
            let custom = DifficultyConfig::new(7, 0, "00:30".parse().unwrap());
            let sequence = generate(
                CUSTOM_DIFFICULTY,
                &groups_only(),
                &mock_configs(),
                Some(&custom),
                &mut seeded(4),
            )
            .unwrap();

            let ids = exercise_ids(&sequence);
            assert_eq!(ids.len(), 7);
            assert!(ids.last().unwrap().ends_with("-left"));
            for pair in ids[..6].chunks(2) {
                assert!(pair[0].ends_with("-left"));
                assert!(pair[1].ends_with("-right"));
            }
        }
    }
}
