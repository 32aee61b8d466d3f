mod color;
mod level;
mod window;
