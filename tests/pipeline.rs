// Integration tests for the full inject/smooth pipeline

#[cfg(test)]
mod tests {
    use smoothpath_rs::*;

    const SAMPLE: [[f64; 2]; 5] = [[1.0, 2.0], [2.0, 7.0], [4.0, 7.0], [6.0, 9.0], [10.0, 11.0]];

    fn sample_path() -> Path {
        Path::from_rows(&SAMPLE, 2).unwrap()
    }

    #[test]
    fn test_sample_scenario_layout() {
        let trajectory = smooth_path(&SAMPLE, 2, 15.0, 0.1).unwrap();
        let count = trajectory.point_count();
        assert!(count <= 150);

        let rows = trajectory.to_rows();
        assert_eq!(rows.len(), count + 1);
        assert_eq!(rows[0][0], (count + 1) as f64);
        assert_eq!(rows[1], vec![1.0, 2.0]);
        assert_eq!(rows[count], vec![10.0, 11.0]);

        // Consumers read the count from row 0 and walk rows 1..count.
        let stored = rows[0][0] as usize;
        assert_eq!(rows[1..stored].len(), count);
    }

    #[test]
    fn test_sample_scenario_is_reproducible() {
        let a = smooth_path(&SAMPLE, 2, 15.0, 0.1).unwrap();
        let b = smooth_path(&SAMPLE, 2, 15.0, 0.1).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.to_rows().iter().zip(b.to_rows().iter()) {
            let xb: Vec<u64> = x.iter().map(|v| v.to_bits()).collect();
            let yb: Vec<u64> = y.iter().map(|v| v.to_bits()).collect();
            assert_eq!(xb, yb);
        }
    }

    #[test]
    fn test_low_budget_scenario() {
        let trajectory = smooth_path(&SAMPLE, 2, 45.0, 0.5).unwrap();
        assert_eq!(trajectory.plan, InjectionPlan::new(6, 2, 0));
        assert_eq!(trajectory.point_count(), 85);
        // The third stage injects nothing but still smooths the path.
        assert_eq!(trajectory.stages[2].injections, 0);
        assert_eq!(trajectory.stages[2].point_count, 85);
    }

    #[test]
    fn test_three_dimensional_waypoints() {
        let waypoints = [
            [2.0, 2.0, 0.0],
            [2.0, 12.0, 180.0],
            [12.0, 22.0, 540.0],
            [22.0, 12.0, 900.0],
            [22.0, 2.0, 1080.0],
        ];
        let trajectory = smooth_path(&waypoints, 3, 15.0, 0.1).unwrap();
        assert_eq!(trajectory.dimension(), 3);
        assert!(trajectory.point_count() <= 150);
        assert_eq!(trajectory.path.first().coords(), &waypoints[0]);
        assert_eq!(trajectory.path.last().coords(), &waypoints[4]);
    }

    #[test]
    fn test_original_points_survive_first_injection() {
        let path = sample_path();
        let plan = plan_injections(path.len(), 15.0, 0.1);
        let injected = inject(&path, plan.stages[0]);
        let stride = plan.stages[0] + 1;
        for (i, p) in path.points().iter().enumerate() {
            assert_eq!(&injected.points()[i * stride], p);
        }
    }

    #[test]
    fn test_each_stage_shortens_the_injected_path() {
        let smoother = PathSmoother::new(SmootherConfig::default()).unwrap();
        let plan = plan_injections(SAMPLE.len(), 15.0, 0.1);
        let mut path = sample_path();
        for &n in plan.stages.iter() {
            let injected = inject(&path, n);
            let smoothed = smoother.smooth(&injected);
            assert!(smoothed.convergence.is_converged());
            assert!(smoothed.path.path_length() <= injected.path_length() + 1e-9);
            path = smoothed.path;
        }
        assert!(path.path_length() < sample_path().path_length());
    }

    #[test]
    fn test_maximal_strategy_never_plans_fewer_points() {
        let path = sample_path();
        for budget in [100.0, 120.0, 130.0, 150.0, 200.0, 400.0, 900.0] {
            let legacy = TrajectoryPipeline::new(PipelineConfig::default())
                .unwrap()
                .run(&path, budget, 1.0)
                .unwrap();
            let maximal = TrajectoryPipeline::new(PipelineConfig {
                strategy: PlanStrategy::MaximalFeasible,
                ..Default::default()
            })
            .unwrap()
            .run(&path, budget, 1.0)
            .unwrap();
            assert!(maximal.point_count() >= legacy.point_count());
            assert!(maximal.point_count() as f64 <= budget);
        }
    }

    #[test]
    fn test_unreachable_budget_keeps_waypoints() {
        let rows: Vec<[f64; 2]> = (0..50).map(|i| [i as f64, (i % 7) as f64]).collect();
        let trajectory = smooth_path(&rows, 2, 1.0, 0.1).unwrap();
        assert!(trajectory.plan.is_identity());
        assert_eq!(trajectory.point_count(), 50);
        assert!(trajectory.stages.iter().all(|s| s.injections == 0 && s.point_count == 50));
        assert_eq!(trajectory.path.first().coords(), &rows[0]);
        assert_eq!(trajectory.path.last().coords(), &rows[49]);
    }

    #[test]
    fn test_input_errors() {
        let one_point = smooth_path(&[[1.0, 2.0]], 2, 15.0, 0.1);
        assert!(matches!(
            one_point,
            Err(TrajectoryError::InvalidPath(PathError::TooFewPoints { count: 1 }))
        ));

        let wrong_dimension = smooth_path(&SAMPLE, 3, 15.0, 0.1);
        assert!(matches!(
            wrong_dimension,
            Err(TrajectoryError::InvalidPath(PathError::DimensionMismatch { .. }))
        ));

        let zero_dimension = smooth_path(&SAMPLE, 0, 15.0, 0.1);
        assert!(matches!(
            zero_dimension,
            Err(TrajectoryError::InvalidPath(PathError::ZeroDimension))
        ));

        let bad_step = smooth_path(&SAMPLE, 2, 15.0, -0.1);
        assert!(matches!(bad_step, Err(TrajectoryError::InvalidTiming { .. })));
    }

    #[test]
    fn test_diverging_weights_fail_instead_of_hanging() {
        let config = PipelineConfig {
            smoother: SmootherConfig {
                data_weight: 0.0,
                smooth_weight: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = TrajectoryPipeline::new(config)
            .unwrap()
            .run(&sample_path(), 15.0, 0.1)
            .unwrap_err();
        assert!(matches!(err, TrajectoryError::Diverged { stage: 0, .. }));
    }

    #[test]
    fn test_reduced_pipeline_plans_from_corner_count() {
        let waypoints = Path::from_rows(
            &[
                [0.0, 0.0],
                [5.0, 0.0],
                [10.0, 0.0],
                [10.0, 5.0],
                [10.0, 10.0],
                [5.0, 10.0],
                [0.0, 10.0],
            ],
            2,
        )
        .unwrap();
        let config = PipelineConfig {
            reduce_waypoints: true,
            ..Default::default()
        };
        let trajectory = TrajectoryPipeline::new(config)
            .unwrap()
            .run(&waypoints, 15.0, 0.1)
            .unwrap();
        assert_eq!(trajectory.plan, plan_injections(4, 15.0, 0.1));
        assert_eq!(trajectory.plan.projected_point_count(4), Some(trajectory.point_count()));
    }
}
