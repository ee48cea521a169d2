mod image_computer;

pub use self::image_computer::{ImageComputer, NodeImages};
