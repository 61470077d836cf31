use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use a_maze_ing::config::Config;
use a_maze_ing::direction::Direction;
use a_maze_ing::grid::{Grid, Walls};
use a_maze_ing::maze_generator::MazeGenerator;
use a_maze_ing::pattern::Pattern;
use a_maze_ing::{solver, Maze, Point};

fn config(width: usize, height: usize, perfect: bool, seed: u64) -> Config {
    Config {
        width,
        height,
        entry: Point::new(0, 0),
        exit: Point::new(width - 1, height - 1),
        output_file: PathBuf::from("maze.txt"),
        perfect,
        seed: Some(seed),
    }
}

/// Every size/mode combination exercised below
fn configs() -> Vec<Config> {
    let mut configs = Vec::new();
    for (width, height) in [(20, 15), (9, 7), (7, 5), (4, 3), (30, 2), (1, 8)] {
        for perfect in [true, false] {
            for seed in 0..3 {
                configs.push(config(width, height, perfect, seed));
            }
        }
    }
    configs
}

/// Passage distance from `start` to every cell, counted independently of
/// the solver
fn distances(grid: &Grid, start: Point) -> Vec<Vec<Option<usize>>> {
    let mut dist = vec![vec![None; grid.width()]; grid.height()];
    dist[start.y][start.x] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        let d = dist[p.y][p.x].unwrap();
        for dir in Direction::ALL {
            if grid.has_wall(p, dir) {
                continue;
            }
            let q = grid.neighbour(p, dir).unwrap();
            if dist[q.y][q.x].is_none() {
                dist[q.y][q.x] = Some(d + 1);
                queue.push_back(q);
            }
        }
    }
    dist
}

#[test]
fn perfect_maze_without_pattern_is_spanning_tree() {
    for (width, height) in [(1, 1), (2, 2), (10, 10), (25, 4), (1, 12), (12, 1)] {
        for seed in 0..5 {
            let mut grid = Grid::new(width, height);
            MazeGenerator::new(Some(seed)).carve(&mut grid);

            assert_eq!(grid.passages(), width * height - 1);
            let dist = distances(&grid, Point::ORIGIN);
            assert!(
                dist.iter().flatten().all(Option::is_some),
                "{width}x{height} seed {seed} is not connected"
            );
        }
    }
}

#[test]
fn perfect_maze_with_pattern_is_tree_over_reachable_cells() {
    for config in configs().into_iter().filter(|c| c.perfect) {
        let mut gen = MazeGenerator::new(config.seed);
        let grid = gen.generate(config.width, config.height, &Pattern::default(), true);
        let start = grid.points().find(|p| !grid.is_obstacle(*p)).unwrap();
        let reachable = solver::reachable(&grid, start);
        assert_eq!(grid.passages() + 1, reachable.len(), "{config:?}");
    }
}

#[test]
fn walls_are_symmetric_and_border_is_closed() {
    for config in configs() {
        let maze = Maze::generate(&config);
        let grid = maze.grid();
        for p in grid.points() {
            for dir in Direction::ALL {
                match grid.neighbour(p, dir) {
                    Some(q) => assert_eq!(
                        grid.has_wall(p, dir),
                        grid.has_wall(q, dir.opposite()),
                        "{config:?}: wall {dir} of {p}"
                    ),
                    None => assert!(grid.has_wall(p, dir), "{config:?}: border {dir} of {p}"),
                }
            }
        }
    }
}

#[test]
fn obstacles_stay_fully_walled() {
    for config in configs() {
        let maze = Maze::generate(&config);
        let expected = Pattern::default().cells(config.width, config.height);
        assert_eq!(
            maze.pattern().collect::<Vec<_>>(),
            expected.into_iter().collect::<Vec<_>>()
        );
        for p in maze.pattern() {
            assert_eq!(maze.grid().walls(p), Walls::all(), "{config:?}: {p}");
        }
    }
}

#[test]
fn braiding_adds_bounded_openings() {
    for (width, height) in [(20, 15), (40, 40), (9, 7), (2, 2)] {
        for seed in 0..5 {
            let mut gen = MazeGenerator::new(Some(seed));
            let obstacles = Pattern::default().cells(width, height);
            let mut grid = Grid::with_obstacles(width, height, obstacles);
            gen.carve(&mut grid);
            let perfect = grid.clone();
            gen.braid(&mut grid);

            let mut opened = 0;
            for p in grid.points() {
                for dir in [Direction::E, Direction::S] {
                    if grid.neighbour(p, dir).is_none() {
                        continue;
                    }
                    if !perfect.has_wall(p, dir) {
                        assert!(!grid.has_wall(p, dir), "braiding closed a passage");
                    } else if !grid.has_wall(p, dir) {
                        opened += 1;
                    }
                }
            }
            assert!(opened <= width * height / 20, "{width}x{height}: {opened} openings");
        }
    }
}

#[test]
fn same_seed_gives_identical_file() {
    for config in configs() {
        let first = Maze::generate(&config).to_string();
        let second = Maze::generate(&config).to_string();
        assert_eq!(first, second, "{config:?}");
    }

    let a = Maze::generate(&config(20, 15, true, 1));
    let b = Maze::generate(&config(20, 15, true, 2));
    assert_ne!(a.grid(), b.grid());
}

#[test]
fn solver_follows_the_tree() {
    for seed in 0..10 {
        let mut grid = Grid::new(3, 3);
        MazeGenerator::new(Some(seed)).carve(&mut grid);
        let (entry, exit) = (Point::new(0, 0), Point::new(2, 2));

        let path = solver::solve(&grid, entry, exit).unwrap();
        let cells = path.walk(&grid, entry).unwrap();
        assert_eq!(cells.last(), Some(&exit));
        assert_eq!(Some(path.len()), distances(&grid, entry)[2][2]);

        let mut unique = cells.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), cells.len(), "path revisits a cell");
    }
}

#[test]
fn solution_is_shortest_in_braided_mazes() {
    for config in configs().into_iter().filter(|c| !c.perfect) {
        let maze = Maze::generate(&config);
        let dist = distances(maze.grid(), maze.entry());
        let expected = dist[maze.exit().y][maze.exit().x];
        assert_eq!(maze.solution().map(|p| p.len()), expected, "{config:?}");
    }
}

#[test]
fn stored_maze_reads_back() {
    for config in configs() {
        let maze = Maze::generate(&config);
        let text = maze.to_string();
        let parsed = Maze::parse(&text).unwrap();
        assert_eq!(parsed, maze, "{config:?}");
        assert_eq!(parsed.to_string(), text);
    }
}

#[test]
fn entry_equal_to_exit() {
    let mut config = config(10, 8, true, 4);
    config.exit = config.entry;
    let maze = Maze::generate(&config);
    assert!(maze.solution().unwrap().is_empty());
    assert!(maze.to_string().ends_with("\n0,0\n0,0\n\n"));
}

#[test]
fn exit_inside_pattern_has_no_solution() {
    // 20x15 centers the pattern at (6, 5), an obstacle cell
    let mut config = config(20, 15, false, 8);
    config.exit = Point::new(6, 5);
    let maze = Maze::generate(&config);
    assert_eq!(maze.solution(), None);
    assert_eq!(Maze::parse(&maze.to_string()).unwrap().solution(), None);
}

#[test]
fn config_file_to_maze_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");
    let config_path = dir.path().join("config.txt");
    fs::write(
        &config_path,
        format!(
            "# test maze\nWIDTH=12\nHEIGHT=9\nENTRY=0,0\nEXIT=11,8\nOUTPUT_FILE={}\nPERFECT=False\nSEED=99\n",
            output.display()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let maze = Maze::generate(&config);
    maze.save(&config.output_file).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 9 + 1 + 3 + 1);
    for row in &lines[..9] {
        assert_eq!(row.len(), 12);
        assert!(row.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F')), "{row}");
    }
    assert_eq!(lines[9], "");
    assert_eq!(lines[10], "0,0");
    assert_eq!(lines[11], "11,8");
    assert_eq!(lines[12], maze.solution().unwrap().to_string());
    assert_eq!(lines[13], "");
}
