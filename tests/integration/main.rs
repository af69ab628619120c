
mod api;
mod signature_not_found;
mod transport;
mod verify;
