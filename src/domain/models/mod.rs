mod remote_object;

pub use remote_object::RemoteObject;
