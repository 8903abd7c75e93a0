use hecs::World;

use crate::components::PaddleIntent;
use crate::resources::ControlInput;

/// Copy this tick's control signal onto every paddle intent
pub fn ingest_control(world: &mut World, control: &ControlInput) {
    for (_entity, intent) in world.query_mut::<&mut PaddleIntent>() {
        intent.dir = control.velocity;
    }
}
