//! Plain-text rendering of a step view.

use std::fmt;

use playstep_core::{GridCell, MovementSnapshot, SimulationSnapshot, SnakeSnapshot};
use playstep_session::query::StepView;
use playstep_system_snake::SnakeConfig;

/// Human-readable summary of a step and its live simulation.
pub(crate) struct TextView<'a> {
    view: &'a StepView,
    snake: &'a SnakeConfig,
}

impl<'a> TextView<'a> {
    pub(crate) const fn new(view: &'a StepView, snake: &'a SnakeConfig) -> Self {
        Self { view, snake }
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        writeln!(
            f,
            "{} step {}/{}: {} [{}]",
            view.mode.as_str(),
            view.index + 1,
            view.total,
            view.title,
            view.concept
        )?;
        writeln!(f, "  {}", view.summary)?;
        writeln!(f, "  features: {}", view.features.names().join(", "))?;
        if view.completed {
            writeln!(f, "  tutorial completed")?;
        }

        match &view.simulation {
            SimulationSnapshot::Movement(movement) => write_movement(f, movement),
            SimulationSnapshot::Snake(snake) => write_snake(f, snake, self.snake),
        }
    }
}

fn write_movement(f: &mut fmt::Formatter<'_>, movement: &MovementSnapshot) -> fmt::Result {
    writeln!(
        f,
        "  player at ({:.1}, {:.1}), collected {}/{}",
        movement.position.x,
        movement.position.y,
        movement.collected_count(),
        movement.collectibles.len()
    )
}

fn write_snake(
    f: &mut fmt::Formatter<'_>,
    snake: &SnakeSnapshot,
    config: &SnakeConfig,
) -> fmt::Result {
    let status = match snake.cause {
        Some(cause) => format!("game over ({cause:?})"),
        None => "running".to_owned(),
    };
    writeln!(
        f,
        "  score {}, length {}, {}ms per tick, {status}",
        snake.score,
        snake.body.len(),
        snake.speed_ms
    )?;

    let head = snake.head();
    for row in 0..config.rows() {
        let line: String = (0..config.columns())
            .map(|column| {
                let cell = GridCell::new(column * config.cell_size, row * config.cell_size);
                if head == Some(cell) {
                    '@'
                } else if snake.body.contains(&cell) {
                    'o'
                } else if snake.food == cell {
                    '*'
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(f, "  {line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use playstep_core::{Direction, Features, GameMode};

    use super::*;

    fn tiny_config() -> SnakeConfig {
        SnakeConfig {
            field_width: 80,
            field_height: 40,
            ..SnakeConfig::default()
        }
    }

    #[test]
    fn snake_grid_marks_head_body_and_food() {
        let view = StepView {
            mode: GameMode::Snake,
            index: 0,
            total: 31,
            title: "A Grid World",
            concept: "grids",
            summary: "The field is divided into square cells.",
            features: Features::GRID,
            is_last: false,
            completed: false,
            simulation: SimulationSnapshot::Snake(SnakeSnapshot {
                body: vec![GridCell::new(20, 0), GridCell::new(0, 0)],
                direction: Direction::Right,
                food: GridCell::new(60, 20),
                score: 0,
                speed_ms: 150,
                game_over: false,
                cause: None,
            }),
        };
        let config = tiny_config();
        let text = TextView::new(&view, &config).to_string();

        assert!(text.starts_with("snake step 1/31: A Grid World [grids]"));
        assert!(text.contains("features: GRID"));
        assert!(text.contains("  o@..\n  ...*\n"));
    }
}
