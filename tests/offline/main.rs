mod support;

mod recovery;
mod replay;
