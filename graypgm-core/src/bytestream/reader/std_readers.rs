use std::io;
use std::io::{BufRead, BufReader, Read};

use crate::bytestream::reader::ByteIoError;
use crate::bytestream::ByteReaderTrait;

impl<T> ByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        let position = self.position() as usize;
        let data = self.get_ref().as_ref();

        match data.get(position).copied() {
            Some(byte) => {
                self.set_position(position as u64 + 1);
                Ok(Some(byte))
            }
            None => Ok(None)
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let position = self.position() as usize;
        let data = self.get_ref().as_ref();
        let remaining = data.len().saturating_sub(position);

        if remaining < buf.len() {
            return Err(ByteIoError::NotEnoughBytes(buf.len(), remaining));
        }
        buf.copy_from_slice(&data[position..position + buf.len()]);
        self.set_position((position + buf.len()) as u64);

        Ok(())
    }
}

impl<T: Read> ByteReaderTrait for BufReader<T> {
    #[inline]
    fn read_byte(&mut self) -> Result<Option<u8>, ByteIoError> {
        let buffer = self.fill_buf().map_err(ByteIoError::from)?;

        match buffer.first().copied() {
            Some(byte) => {
                self.consume(1);
                Ok(Some(byte))
            }
            None => Ok(None)
        }
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        // read in a loop so that a short read can report how far we got,
        // std's read_exact throws that count away
        let mut bytes_read = 0;

        while bytes_read < buf.len() {
            match self.read(&mut buf[bytes_read..]) {
                Ok(0) => return Err(ByteIoError::NotEnoughBytes(buf.len(), bytes_read)),
                Ok(n) => bytes_read += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ByteIoError::from(e))
            }
        }
        Ok(())
    }
}
