mod notebook;
mod roundtrip;
