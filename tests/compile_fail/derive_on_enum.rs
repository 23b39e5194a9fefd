use identity_collection::Identifiable;

#[derive(Identifiable)]
enum Event {
    Created { id: u32 },
    Deleted { id: u32 },
}

fn main() {}
