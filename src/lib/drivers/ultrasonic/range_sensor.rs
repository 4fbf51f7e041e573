/// Sensor collaborator for the wall follower.
pub trait RangeSensor {
    type Error;

    // distance in meters, max range when there is no echo
    fn fetch_sample(&mut self) -> Result<f32, Self::Error>;
}
