//! Movement module - walking, climbing and falling

use crate::game_state::Simulation;
use crate::mine::Coord;
use crate::rescue::Cutscene;
use crate::types::{BlockKind, Direction, MOVE_STAMINA_COST};

impl Simulation {
    /// Move the player one cell
    ///
    /// Sideways moves enter any cell the player can stand in, or step up onto
    /// a solid cell whose top is open. Climbing up needs a ladder in the
    /// player's cell; walking down needs a ladder below. A `forced` move is
    /// gravity: it goes down into anything non-solid and costs no stamina.
    pub(crate) fn move_player(
        &mut self,
        dir: Direction,
        forced: bool,
        cutscene: &mut dyn Cutscene,
    ) -> bool {
        let pos = self.player.pos;
        let Some(next) = pos.step(dir) else {
            return false;
        };
        let next_cell = *self.mine.get(next);

        let moved = match dir {
            Direction::Up => {
                if self.mine.kind(pos) == BlockKind::Ladder && !next_cell.solid_for_player() {
                    self.player.pos = next;
                    self.player.scroll(Direction::Up);
                    true
                } else {
                    false
                }
            }
            Direction::Down => {
                let fall = forced && !next_cell.solid_for_player();
                let climb = !forced && next_cell.kind == BlockKind::Ladder;
                if fall || climb {
                    self.player.pos = next;
                    self.player.scroll(Direction::Down);
                    true
                } else {
                    false
                }
            }
            Direction::Left | Direction::Right => {
                if !next_cell.solid_for_player() {
                    self.player.pos = next;
                    self.player.scroll(dir);
                    true
                } else if self.can_step_up(next) {
                    self.player.pos = next.above();
                    self.player.scroll(dir);
                    self.player.scroll(Direction::Up);
                    true
                } else {
                    false
                }
            }
        };

        if moved && !forced {
            self.deplete_stamina(MOVE_STAMINA_COST, cutscene);
        }
        moved
    }

    /// Whether the player can climb onto the solid block at `at`
    fn can_step_up(&self, at: Coord) -> bool {
        let above = at.above();
        above.in_bounds()
            && self.mine.get(at).solid_for_player()
            && !self.mine.get(above).solid_for_player()
    }
}
