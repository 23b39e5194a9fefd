use identity_collection::Identifiable;

#[derive(Identifiable)]
struct Measurement {
    sensor: String,
    reading: f64,
}

fn main() {}
