mod game;
mod predict;
