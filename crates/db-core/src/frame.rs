/// Buffer de pixels réutilisable. Pré-alloué, jamais redimensionné en hot path.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use db_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer pré-alloué aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use db_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(320, 256);
    /// assert_eq!(fb.data.len(), 320 * 256 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 4) as usize],
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// Hors limites : renvoie un pixel transparent.
    ///
    /// # Example
    /// ```
    /// use db_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// assert_eq!(fb.pixel(50, 50), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Copie des pixels RGBA de même taille. No-op si la taille diffère.
    pub fn copy_from_rgba(&mut self, rgba: &[u8]) {
        if rgba.len() == self.data.len() {
            self.data.copy_from_slice(rgba);
        } else {
            log::error!(
                "FrameBuffer size mismatch: {} bytes, expected {}",
                rgba.len(),
                self.data.len()
            );
        }
    }
}

/// Grille de cellules terminal. Pré-allouée, réutilisée chaque frame.
///
/// # Example
/// ```
/// use db_core::frame::{Cell, CellGrid};
/// let mut grid = CellGrid::new(80, 24);
/// grid.set(0, 0, Cell { ch: '▄', fg: (255, 0, 0), bg: (0, 0, 0) });
/// assert_eq!(grid.get(0, 0).ch, '▄');
/// ```
#[derive(Clone)]
pub struct CellGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<Cell>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

/// Single terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground (RGB).
    pub fg: (u8, u8, u8),
    /// Couleur background (RGB).
    pub bg: (u8, u8, u8),
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: (0, 0, 0),
            bg: (0, 0, 0),
        }
    }
}

impl CellGrid {
    /// Crée une grille pré-allouée.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &Cell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Réalloue uniquement si les dimensions changent (resize terminal).
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }
}
